//! Rule checks
//!
//! A rule check scores one behavioral rule against one artifact. Every
//! condition is evaluated, so the issue list is exhaustive rather than
//! stopping at the first failure.

use serde::Serialize;
use tracing::{debug, error};

use crate::artifact::ArtifactSet;
use crate::error::Result;
use crate::marker::MatchMode;
use crate::rubric::{validate_rule_def, ConditionKind, RuleDef};

/// Outcome of a single rule check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub id: String,
    pub label: String,
    /// Always within `0..=max`
    pub score: f64,
    pub max: f64,
    pub issues: Vec<String>,
}

/// Trait for implementing rule checks
///
/// New rules can be added to a component without touching the aggregator
/// or the scorer.
pub trait RuleCheck {
    /// Unique identifier (e.g., "word-count")
    fn id(&self) -> &str;

    /// Label printed in the report
    fn label(&self) -> &str;

    /// Maximum score this check can award
    fn max(&self) -> f64;

    /// Score the check against the loaded artifacts
    fn evaluate(&self, artifacts: &ArtifactSet, mode: MatchMode) -> CheckResult;

    /// Verify the check's internal weights
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Clamp `score` into `0..=max`, logging if the clamp had to act
pub(crate) fn clamp_score(id: &str, score: f64, max: f64) -> f64 {
    let clamped = score.clamp(0.0, max);
    if clamped != score {
        error!(check = id, score, max, "score outside bounds, clamped");
    }
    clamped
}

/// Rule check driven by a static [`RuleDef`]
#[derive(Debug, Clone, Copy)]
pub struct MarkerRule {
    def: &'static RuleDef,
}

impl MarkerRule {
    pub fn new(def: &'static RuleDef) -> Self {
        Self { def }
    }
}

impl RuleCheck for MarkerRule {
    fn id(&self) -> &str {
        self.def.id
    }

    fn label(&self) -> &str {
        self.def.label
    }

    fn max(&self) -> f64 {
        self.def.max
    }

    fn evaluate(&self, artifacts: &ArtifactSet, mode: MatchMode) -> CheckResult {
        let Some(text) = artifacts.text(self.def.role) else {
            debug!(check = self.def.id, role = %self.def.role, "artifact absent");
            return CheckResult {
                id: self.def.id.to_string(),
                label: self.def.label.to_string(),
                score: 0.0,
                max: self.def.max,
                issues: vec![format!("{} not found", artifacts.name(self.def.role))],
            };
        };

        let mut score = 0.0;
        let mut issues = Vec::new();

        for condition in self.def.conditions {
            match condition.kind {
                ConditionKind::Marker(marker) => {
                    if marker.is_present(text, mode) {
                        score += condition.points;
                    } else {
                        issues.push(condition.issue.to_string());
                    }
                }
                ConditionKind::Threshold { markers, min, noun } => {
                    let found = markers.iter().filter(|m| text.contains(*m)).count();
                    if found >= min {
                        score += condition.points;
                    } else {
                        issues.push(format!("Only {}/{} {} found", found, markers.len(), noun));
                    }
                }
            }
        }

        let score = clamp_score(self.def.id, score, self.def.max);
        debug!(
            check = self.def.id,
            score,
            max = self.def.max,
            issues = issues.len(),
            "check_scored"
        );

        CheckResult {
            id: self.def.id.to_string(),
            label: self.def.label.to_string(),
            score,
            max: self.def.max,
            issues,
        }
    }

    fn validate(&self) -> Result<()> {
        validate_rule_def(self.def)
    }
}
