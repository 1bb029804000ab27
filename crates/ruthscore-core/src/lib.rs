//! Ruthscore Core Library
//!
//! Static conformance scoring for the RUTH V2 agent: a fixed rubric of
//! marker checks over four source artifacts, aggregated into a 100-point
//! report with a pass/review verdict.

pub mod artifact;
pub mod check;
pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod logging;
pub mod marker;
pub mod report;
pub mod rubric;

pub use artifact::{ArtifactLoader, ArtifactRole, ArtifactSet, FsLoader, MemoryLoader};
pub use engine::Scorer;
pub use report::{Band, Report, Verdict, PASS_THRESHOLD};
