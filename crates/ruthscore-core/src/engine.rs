//! Scoring engine
//!
//! Orchestration only: snapshot the artifacts, run each component in
//! order, and build the report. No state survives between runs.

use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::info;

use crate::artifact::{ArtifactLoader, ArtifactSet};
use crate::error::Result;
use crate::marker::MatchMode;
use crate::report::Report;
use crate::rubric::Rubric;
use crate::trace_time;

pub struct Scorer {
    rubric: Rubric,
    mode: MatchMode,
}

impl Scorer {
    /// Create a scorer, rejecting a rubric whose weights do not add up
    pub fn new(rubric: Rubric) -> Result<Self> {
        rubric.validate()?;
        Ok(Self {
            rubric,
            mode: MatchMode::default(),
        })
    }

    /// Scorer for the standard rubric
    pub fn standard() -> Result<Self> {
        Self::new(Rubric::standard())
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Score the artifacts currently visible through `loader`
    pub fn score(&self, loader: &dyn ArtifactLoader) -> Report {
        self.score_at(loader, Local::now())
    }

    /// Score with a fixed report timestamp
    #[tracing::instrument(skip(self, loader), fields(mode = %self.mode))]
    pub fn score_at(&self, loader: &dyn ArtifactLoader, generated_at: DateTime<Local>) -> Report {
        let start = Instant::now();

        let artifacts = ArtifactSet::load(loader);
        trace_time!(start, "artifacts_loaded");

        let components = self
            .rubric
            .components()
            .iter()
            .map(|component| component.aggregate(&artifacts, self.mode))
            .collect();

        let report = Report::new(generated_at, self.mode, self.rubric.max(), components);
        info!(
            total = report.total,
            verdict = %report.verdict,
            issues = report.issues.len(),
            "scoring_complete"
        );
        trace_time!(start, "score");

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactRole, MemoryLoader};
    use crate::component::Component;
    use crate::fixtures::complete_artifacts;
    use crate::report::Verdict;

    fn at() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn test_complete_artifacts_score_100() {
        let scorer = Scorer::standard().unwrap();
        let report = scorer.score(&complete_artifacts());
        assert_eq!(report.total, 100.0);
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
        for component in &report.components {
            assert_eq!(component.score, 25.0, "{}", component.name);
        }
    }

    #[test]
    fn test_complete_artifacts_score_100_strict() {
        let scorer = Scorer::standard().unwrap().with_mode(MatchMode::Strict);
        let report = scorer.score(&complete_artifacts());
        assert_eq!(report.total, 100.0, "{:?}", report.issues);
    }

    #[test]
    fn test_all_absent_scores_zero() {
        let scorer = Scorer::standard().unwrap();
        let report = scorer.score(&MemoryLoader::new());
        assert_eq!(report.total, 0.0);
        assert_eq!(report.verdict, Verdict::Review);

        let check_count: usize = report.components.iter().map(|c| c.checks.len()).sum();
        assert_eq!(report.issues.len(), check_count);
        assert!(report.issues.iter().all(|i| i.ends_with(" not found")));
    }

    #[test]
    fn test_missing_truncate_loses_exactly_three() {
        let scorer = Scorer::standard().unwrap();
        let mut loader = complete_artifacts();
        let validator = loader
            .remove(ArtifactRole::ResponseValidator)
            .unwrap()
            .replace("truncateToWordLimit", "shortenResponse");
        loader.insert(ArtifactRole::ResponseValidator, validator);

        let report = scorer.score(&loader);
        assert_eq!(report.total, 97.0);
        assert_eq!(report.check("word-count").unwrap().score, 7.0);
        assert_eq!(report.issues, vec!["Missing truncateToWordLimit function"]);
        for component in &report.components {
            for check in &component.checks {
                if check.id != "word-count" {
                    assert_eq!(check.score, check.max, "{}", check.id);
                }
            }
        }
    }

    #[test]
    fn test_idempotent_runs() {
        let scorer = Scorer::standard().unwrap();
        let loader = complete_artifacts().with(ArtifactRole::MessagePipeline, "detectFrustration");
        let generated_at = at();
        let first = scorer.score_at(&loader, generated_at);
        let second = scorer.score_at(&loader, generated_at);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_pipeline_drops_flow_and_integration() {
        let scorer = Scorer::standard().unwrap();
        let mut loader = complete_artifacts();
        loader.remove(ArtifactRole::MessagePipeline);

        let report = scorer.score(&loader);
        assert_eq!(report.total, 84.0);
        assert_eq!(report.verdict, Verdict::Review);
        assert_eq!(
            report.issues,
            vec!["messagePipeline.ts not found", "messagePipeline.ts not found"]
        );
    }

    #[test]
    fn test_malformed_rubric_rejected() {
        let rubric = Rubric::new(vec![Component::new("empty", "Empty", 25.0, Vec::new())], 25.0);
        assert!(Scorer::new(rubric).is_err());
    }
}
