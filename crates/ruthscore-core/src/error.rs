//! Error types and exit codes for ruthscore
//!
//! Exit codes:
//! - 0: Success (score at or above the pass threshold)
//! - 1: Generic failure, including a report that needs review
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unreadable or invalid config, malformed rubric)
//!
//! Missing artifacts and missing markers are scoring outcomes, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure, or a report below the pass threshold (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - invalid config or rubric (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while preparing or running a scoring pass
#[derive(Error, Debug)]
pub enum ScoreError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("config file not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("malformed rubric: {reason}")]
    MalformedRubric { reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ScoreError {
    /// Create an error for a rubric whose weights do not add up
    pub fn malformed_rubric(reason: impl Into<String>) -> Self {
        ScoreError::MalformedRubric {
            reason: reason.into(),
        }
    }

    /// Create an error for a config file that failed to parse or validate
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        ScoreError::InvalidConfig {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ScoreError::UnknownFormat(_) | ScoreError::UsageError(_) => ExitCode::Usage,

            ScoreError::ConfigNotFound { .. }
            | ScoreError::InvalidConfig { .. }
            | ScoreError::MalformedRubric { .. } => ExitCode::Data,

            ScoreError::Io(_) | ScoreError::Json(_) | ScoreError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ScoreError::UnknownFormat(_) => "unknown_format",
            ScoreError::UsageError(_) => "usage_error",
            ScoreError::ConfigNotFound { .. } => "config_not_found",
            ScoreError::InvalidConfig { .. } => "invalid_config",
            ScoreError::MalformedRubric { .. } => "malformed_rubric",
            ScoreError::Io(_) => "io_error",
            ScoreError::Json(_) => "json_error",
            ScoreError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for ruthscore operations
pub type Result<T> = std::result::Result<T, ScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ScoreError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            ScoreError::malformed_rubric("sum 24").exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            ScoreError::ConfigNotFound {
                path: PathBuf::from("missing.toml")
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(ScoreError::Other("x".into()).exit_code(), ExitCode::Failure);
    }

    #[test]
    fn test_to_json_envelope() {
        let err = ScoreError::invalid_config("ruthscore.toml", "unknown field `foo`");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "invalid_config");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("unknown field"));
    }

    #[test]
    fn test_exit_code_into_i32() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Failure), 1);
    }
}
