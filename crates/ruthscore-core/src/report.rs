//! Report model, verdict and presentation bands

use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::component::ComponentResult;
use crate::marker::MatchMode;

/// Minimum total for a passing verdict
pub const PASS_THRESHOLD: f64 = 90.0;

/// Pass/fail classification; the only input to the exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Review,
}

impl Verdict {
    pub fn from_total(total: f64) -> Self {
        if total >= PASS_THRESHOLD {
            Verdict::Pass
        } else {
            Verdict::Review
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Review => write!(f, "review"),
        }
    }
}

/// Severity band printed with the verdict.
///
/// Bands below `Excellent` only change the guidance text, never the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    Excellent,
    Good,
    Acceptable,
    NeedsWork,
}

impl Band {
    pub fn from_total(total: f64) -> Self {
        if total >= PASS_THRESHOLD {
            Band::Excellent
        } else if total >= 80.0 {
            Band::Good
        } else if total >= 70.0 {
            Band::Acceptable
        } else {
            Band::NeedsWork
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Band::Excellent => "EXCELLENT - Ruth is working perfectly",
            Band::Good => "GOOD - Minor adjustments needed",
            Band::Acceptable => "ACCEPTABLE - Multiple improvements needed",
            Band::NeedsWork => "NEEDS WORK - Go back to system prompt",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            Band::Excellent => "Ready for production deployment",
            Band::Good => "Review the components with lower scores",
            Band::Acceptable => "Make targeted fixes to failing components",
            Band::NeedsWork => "Review UPDATE_RUTH_BOT_EXISTING.md",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Excellent => write!(f, "excellent"),
            Band::Good => write!(f, "good"),
            Band::Acceptable => write!(f, "acceptable"),
            Band::NeedsWork => write!(f, "needs-work"),
        }
    }
}

/// Result of one full scoring run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub mode: MatchMode,
    pub total: f64,
    pub max: f64,
    pub components: Vec<ComponentResult>,
    pub issues: Vec<String>,
    pub verdict: Verdict,
    pub band: Band,
}

impl Report {
    pub fn new(
        generated_at: DateTime<Local>,
        mode: MatchMode,
        max: f64,
        components: Vec<ComponentResult>,
    ) -> Self {
        let total: f64 = components.iter().map(|c| c.score).sum::<f64>().clamp(0.0, max);
        let issues = components
            .iter()
            .flat_map(|c| c.issues.iter().cloned())
            .collect();

        Self {
            generated_at,
            mode,
            total,
            max,
            components,
            issues,
            verdict: Verdict::from_total(total),
            band: Band::from_total(total),
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    /// Look up a check result by id
    pub fn check(&self, id: &str) -> Option<&crate::check::CheckResult> {
        self.components
            .iter()
            .flat_map(|c| c.checks.iter())
            .find(|c| c.id == id)
    }
}

/// Format points without a trailing `.0` for whole numbers (`7.5`, `10`)
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}
