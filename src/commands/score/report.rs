//! Report rendering for the human, JSON and records formats

use ruthscore_core::component::ComponentResult;
use ruthscore_core::error::Result;
use ruthscore_core::marker::MatchMode;
use ruthscore_core::report::format_points;
use ruthscore_core::{Report, Verdict};

use crate::cli::{Cli, OutputFormat};

const WIDE_RULE: &str = "============================================================";
const NARROW_RULE: &str = "========================================";
const STRICT_NOTICE: &str = "Mode: strict (structural matching, deviates from literal scoring)";

/// Output the report in the requested format
pub fn output_report(cli: &Cli, report: &Report) -> Result<()> {
    let rendered = match cli.format {
        OutputFormat::Human => render_human(report, cli.quiet),
        OutputFormat::Json => render_json(report)?,
        OutputFormat::Records => render_records(report),
    };
    println!("{}", rendered);
    Ok(())
}

/// Render the terminal report. `quiet` drops the closing banner.
pub fn render_human(report: &Report, quiet: bool) -> String {
    let mut lines = vec![
        String::new(),
        WIDE_RULE.to_string(),
        "RUTH V2 BEHAVIORAL ASSESSMENT".to_string(),
        format!("Date: {}", report.generated_at.format("%Y-%m-%d %H:%M")),
    ];
    if report.mode == MatchMode::Strict {
        lines.push(STRICT_NOTICE.to_string());
    }
    lines.push(WIDE_RULE.to_string());

    for (index, component) in report.components.iter().enumerate() {
        component_lines(&mut lines, index + 1, component);
    }

    lines.push(String::new());
    lines.push(WIDE_RULE.to_string());
    lines.push(format!(
        "FINAL SCORE: {}/{}",
        format_points(report.total),
        format_points(report.max)
    ));
    lines.push(WIDE_RULE.to_string());
    lines.push(report.band.headline().to_string());
    lines.push(format!("   {}", report.band.guidance()));

    if !report.issues.is_empty() {
        lines.push(String::new());
        lines.push(format!("ISSUES FOUND ({}):", report.issues.len()));
        for issue in &report.issues {
            lines.push(format!("  - {}", issue));
        }
    }

    if !quiet {
        lines.push(String::new());
        lines.push(format!(
            "Score: {}/{}",
            format_points(report.total),
            format_points(report.max)
        ));
        lines.push(
            match report.verdict {
                Verdict::Pass => "ALL TESTS PASSED - Ruth is ready!",
                Verdict::Review => "Some tests failed - Fix Ruth and retrain",
            }
            .to_string(),
        );
    }

    lines.join("\n")
}

fn component_lines(lines: &mut Vec<String>, number: usize, component: &ComponentResult) {
    lines.push(String::new());
    lines.push(NARROW_RULE.to_string());
    lines.push(format!(
        "COMPONENT {}: {} (0-{})",
        number,
        component.name.to_uppercase(),
        format_points(component.max)
    ));
    lines.push(NARROW_RULE.to_string());

    for check in &component.checks {
        lines.push(format!(
            "  {}: {}/{}",
            check.label,
            format_points(check.score),
            format_points(check.max)
        ));
    }

    lines.push(format!(
        "  -> {} TOTAL: {}/{}",
        component.id.to_uppercase(),
        format_points(component.score),
        format_points(component.max)
    ));
}

pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render one record per line: `H` header, then `C` per component,
/// `R` per check and `D` per issue.
pub fn render_records(report: &Report) -> String {
    let mut lines = vec![format!(
        "H ruthscore=1 total={} max={} verdict={} band={} mode={}",
        format_points(report.total),
        format_points(report.max),
        report.verdict,
        report.band,
        report.mode
    )];

    for component in &report.components {
        lines.push(format!(
            "C {} score={} max={} \"{}\"",
            component.id,
            format_points(component.score),
            format_points(component.max),
            quote(&component.name)
        ));
        for check in &component.checks {
            lines.push(format!(
                "R {} component={} score={} max={} \"{}\"",
                check.id,
                component.id,
                format_points(check.score),
                format_points(check.max),
                quote(&check.label)
            ));
        }
    }

    for component in &report.components {
        for check in &component.checks {
            for issue in &check.issues {
                lines.push(format!("D issue {} \"{}\"", check.id, quote(issue)));
            }
        }
    }

    lines.join("\n")
}

fn quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
