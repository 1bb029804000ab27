//! End-to-end scoring against artifacts on disk

use std::fs;
use std::path::Path;

use ruthscore_core::config::{ArtifactPaths, ScorerConfig};
use ruthscore_core::fixtures;
use ruthscore_core::marker::MatchMode;
use ruthscore_core::{ArtifactRole, FsLoader, Scorer, Verdict};
use tempfile::tempdir;

fn write_artifact(root: &Path, role: ArtifactRole, text: &str) {
    let path = root.join(role.default_path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn write_complete_set(root: &Path) {
    for role in ArtifactRole::ALL {
        write_artifact(root, role, fixtures::sample(role));
    }
}

#[test]
fn complete_project_scores_100() {
    let dir = tempdir().unwrap();
    write_complete_set(dir.path());

    let loader = FsLoader::new(dir.path(), ArtifactPaths::default());
    let report = Scorer::standard().unwrap().score(&loader);

    assert_eq!(report.total, 100.0);
    assert_eq!(report.verdict, Verdict::Pass);
    assert!(report.issues.is_empty());
}

#[test]
fn empty_project_scores_zero_with_not_found_issues() {
    let dir = tempdir().unwrap();
    let loader = FsLoader::new(dir.path(), ArtifactPaths::default());
    let report = Scorer::standard().unwrap().score(&loader);

    assert_eq!(report.total, 0.0);
    assert_eq!(report.verdict, Verdict::Review);
    assert_eq!(
        report.issues,
        vec![
            "callbackHandler.ts not found",
            "systemPrompts.ts not found",
            "responseValidator.ts not found",
            "responseValidator.ts not found",
            "systemPrompts.ts not found",
            "responseValidator.ts not found",
            "responseValidator.ts not found",
            "messagePipeline.ts not found",
            "responseValidator.ts not found",
            "messagePipeline.ts not found",
            "callbackHandler.ts not found",
        ]
    );
}

#[test]
fn rescoring_after_edit_reflects_new_content() {
    let dir = tempdir().unwrap();
    write_complete_set(dir.path());
    let loader = FsLoader::new(dir.path(), ArtifactPaths::default());
    let scorer = Scorer::standard().unwrap();

    assert_eq!(scorer.score(&loader).total, 100.0);

    let edited = fixtures::SAMPLE_SYSTEM_PROMPT.replace("RULE 7: NO REPETITION", "");
    write_artifact(dir.path(), ArtifactRole::SystemPrompt, &edited);

    let report = scorer.score(&loader);
    assert_eq!(report.total, 98.0);
    assert_eq!(report.issues, vec!["Missing rule: RULE 7: NO REPETITION"]);
}

#[test]
fn configured_paths_are_used() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("ruthscore.toml"),
        "[artifacts]\nresponse_validator = \"lib/validator.ts\"\n",
    )
    .unwrap();
    for role in ArtifactRole::ALL {
        if role != ArtifactRole::ResponseValidator {
            write_artifact(dir.path(), role, fixtures::sample(role));
        }
    }
    fs::create_dir_all(dir.path().join("lib")).unwrap();
    fs::write(
        dir.path().join("lib/validator.ts"),
        fixtures::SAMPLE_RESPONSE_VALIDATOR,
    )
    .unwrap();

    let config = ScorerConfig::resolve(dir.path(), None).unwrap();
    let loader = FsLoader::new(dir.path(), config.artifacts.clone());
    let report = Scorer::standard()
        .unwrap()
        .with_mode(config.match_mode())
        .score(&loader);
    assert_eq!(report.total, 100.0);
}

#[test]
fn missing_configured_file_reports_its_name() {
    let dir = tempdir().unwrap();
    write_complete_set(dir.path());
    let paths = ArtifactPaths {
        intake_handler: "handlers/intake.ts".into(),
        ..ArtifactPaths::default()
    };
    let loader = FsLoader::new(dir.path(), paths);
    let report = Scorer::standard().unwrap().score(&loader);

    assert_eq!(report.total, 82.0);
    assert_eq!(
        report.issues,
        vec!["intake.ts not found", "intake.ts not found"]
    );
}

#[test]
fn strict_mode_only_affects_structural_markers() {
    let dir = tempdir().unwrap();
    write_complete_set(dir.path());
    let loose_validator = fixtures::SAMPLE_RESPONSE_VALIDATOR
        .replace("const MAX_WORDS = 55;", "const MAX_WORDS = 60; // was 55");
    write_artifact(dir.path(), ArtifactRole::ResponseValidator, &loose_validator);

    let loader = FsLoader::new(dir.path(), ArtifactPaths::default());
    let literal = Scorer::standard().unwrap().score(&loader);
    let strict = Scorer::standard()
        .unwrap()
        .with_mode(MatchMode::Strict)
        .score(&loader);

    assert_eq!(literal.total, 100.0);
    assert_eq!(strict.total, 96.0);
    assert_eq!(strict.issues, vec!["Missing MAX_WORDS = 55 constant"]);
}
