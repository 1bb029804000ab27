//! The scoring run behind a bare `ruthscore` invocation

pub mod report;

use std::time::Instant;

use tracing::debug;

use ruthscore_core::config::ScorerConfig;
use ruthscore_core::error::Result;
use ruthscore_core::marker::MatchMode;
use ruthscore_core::{FsLoader, Scorer, Verdict};

use crate::cli::paths::resolve_root_path;
use crate::cli::Cli;

/// Score the project, print the report and hand back the verdict
pub fn execute(cli: &Cli, start: Instant) -> Result<Verdict> {
    let root = resolve_root_path(cli.root.clone());
    let config = ScorerConfig::resolve(&root, cli.config.as_deref())?;

    let mode = if cli.strict {
        MatchMode::Strict
    } else {
        config.match_mode()
    };

    if cli.verbose {
        debug!(root = %root.display(), %mode, elapsed = ?start.elapsed(), "config_resolved");
    }

    let loader = FsLoader::new(root, config.artifacts);
    let scorer = Scorer::standard()?.with_mode(mode);
    let report = scorer.score(&loader);

    if cli.verbose {
        debug!(elapsed = ?start.elapsed(), "scored");
    }

    report::output_report(cli, &report)?;
    Ok(report.verdict)
}
