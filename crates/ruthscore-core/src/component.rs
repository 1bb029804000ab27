//! Component aggregation

use serde::Serialize;
use tracing::debug;

use crate::artifact::ArtifactSet;
use crate::check::{clamp_score, CheckResult, RuleCheck};
use crate::error::{Result, ScoreError};
use crate::marker::MatchMode;
use crate::rubric::points_eq;

/// A named group of rule checks with a combined point ceiling
pub struct Component {
    id: &'static str,
    name: &'static str,
    max: f64,
    checks: Vec<Box<dyn RuleCheck>>,
}

/// Subtotal and per-check results of one component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentResult {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub max: f64,
    pub checks: Vec<CheckResult>,
    pub issues: Vec<String>,
}

impl Component {
    pub fn new(
        id: &'static str,
        name: &'static str,
        max: f64,
        checks: Vec<Box<dyn RuleCheck>>,
    ) -> Self {
        Self {
            id,
            name,
            max,
            checks,
        }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn checks(&self) -> &[Box<dyn RuleCheck>] {
        &self.checks
    }

    /// Check that rule maxima sum to the component maximum and that each
    /// rule is internally consistent.
    pub fn validate(&self) -> Result<()> {
        for check in &self.checks {
            check.validate()?;
        }

        let sum: f64 = self.checks.iter().map(|c| c.max()).sum();
        if !points_eq(sum, self.max) {
            return Err(ScoreError::malformed_rubric(format!(
                "component '{}' rule maxima sum to {}, expected {}",
                self.id, sum, self.max
            )));
        }
        Ok(())
    }

    /// Run every check in order and combine the results.
    pub fn aggregate(&self, artifacts: &ArtifactSet, mode: MatchMode) -> ComponentResult {
        let checks: Vec<CheckResult> = self
            .checks
            .iter()
            .map(|check| check.evaluate(artifacts, mode))
            .collect();

        let raw: f64 = checks.iter().map(|c| c.score).sum();
        let score = clamp_score(self.id, raw, self.max);
        let issues = checks.iter().flat_map(|c| c.issues.iter().cloned()).collect();

        debug!(component = self.id, score, max = self.max, "component_scored");

        ComponentResult {
            id: self.id.to_string(),
            name: self.name.to_string(),
            score,
            max: self.max,
            checks,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactRole, MemoryLoader};

    struct Fixed {
        id: &'static str,
        score: f64,
        max: f64,
    }

    impl RuleCheck for Fixed {
        fn id(&self) -> &str {
            self.id
        }

        fn label(&self) -> &str {
            self.id
        }

        fn max(&self) -> f64 {
            self.max
        }

        fn evaluate(&self, _artifacts: &ArtifactSet, _mode: MatchMode) -> CheckResult {
            CheckResult {
                id: self.id.to_string(),
                label: self.id.to_string(),
                score: self.score,
                max: self.max,
                issues: vec![format!("{} issue", self.id)],
            }
        }
    }

    fn fixed(id: &'static str, score: f64, max: f64) -> Box<dyn RuleCheck> {
        Box::new(Fixed { id, score, max })
    }

    fn empty_set() -> ArtifactSet {
        ArtifactSet::load(&MemoryLoader::new().with(ArtifactRole::SystemPrompt, ""))
    }

    #[test]
    fn test_aggregate_sums_and_preserves_issue_order() {
        let component = Component::new(
            "c",
            "Component",
            25.0,
            vec![fixed("a", 10.0, 10.0), fixed("b", 7.5, 15.0)],
        );
        let result = component.aggregate(&empty_set(), MatchMode::Literal);
        assert_eq!(result.score, 17.5);
        assert_eq!(result.checks.len(), 2);
        assert_eq!(result.issues, vec!["a issue", "b issue"]);
    }

    #[test]
    fn test_aggregate_caps_at_max() {
        let component = Component::new(
            "c",
            "Component",
            25.0,
            vec![fixed("a", 20.0, 20.0), fixed("b", 10.0, 10.0)],
        );
        let result = component.aggregate(&empty_set(), MatchMode::Literal);
        assert_eq!(result.score, 25.0);
        assert!(component.validate().is_err());
    }

    #[test]
    fn test_validate_consistent_component() {
        let component = Component::new(
            "c",
            "Component",
            25.0,
            vec![fixed("a", 0.0, 10.0), fixed("b", 0.0, 15.0)],
        );
        component.validate().unwrap();
    }

    #[test]
    fn test_standard_components_score_zero_when_absent() {
        let rubric = crate::rubric::Rubric::standard();
        let artifacts = ArtifactSet::load(&MemoryLoader::new());
        for component in rubric.components() {
            let result = component.aggregate(&artifacts, MatchMode::Literal);
            assert_eq!(result.score, 0.0);
            assert_eq!(result.issues.len(), result.checks.len());
        }
    }
}
