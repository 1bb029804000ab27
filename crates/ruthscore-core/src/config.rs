//! Scorer configuration
//!
//! Configuration is read from `ruthscore.toml` in the project root, or from
//! an explicit `--config` path. Every field is optional; the defaults point
//! at the standard layout of the agent repository.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactRole;
use crate::error::{Result, ScoreError};
use crate::marker::MatchMode;

/// File name looked up in the project root when no config path is given
pub const CONFIG_FILE: &str = "ruthscore.toml";

/// Top-level scorer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScorerConfig {
    /// Use structural matching for constants and numbered options
    #[serde(default)]
    pub strict: bool,

    /// Artifact locations, relative to the project root
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

/// Location of each artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactPaths {
    #[serde(default = "default_intake_handler")]
    pub intake_handler: PathBuf,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: PathBuf,
    #[serde(default = "default_response_validator")]
    pub response_validator: PathBuf,
    #[serde(default = "default_message_pipeline")]
    pub message_pipeline: PathBuf,
}

fn default_intake_handler() -> PathBuf {
    PathBuf::from(ArtifactRole::IntakeHandler.default_path())
}

fn default_system_prompt() -> PathBuf {
    PathBuf::from(ArtifactRole::SystemPrompt.default_path())
}

fn default_response_validator() -> PathBuf {
    PathBuf::from(ArtifactRole::ResponseValidator.default_path())
}

fn default_message_pipeline() -> PathBuf {
    PathBuf::from(ArtifactRole::MessagePipeline.default_path())
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            intake_handler: default_intake_handler(),
            system_prompt: default_system_prompt(),
            response_validator: default_response_validator(),
            message_pipeline: default_message_pipeline(),
        }
    }
}

impl ArtifactPaths {
    pub fn get(&self, role: ArtifactRole) -> &Path {
        match role {
            ArtifactRole::IntakeHandler => &self.intake_handler,
            ArtifactRole::SystemPrompt => &self.system_prompt,
            ArtifactRole::ResponseValidator => &self.response_validator,
            ArtifactRole::MessagePipeline => &self.message_pipeline,
        }
    }
}

impl ScorerConfig {
    /// Matching mode selected by this config
    pub fn match_mode(&self) -> MatchMode {
        if self.strict {
            MatchMode::Strict
        } else {
            MatchMode::Literal
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ScoreError::ConfigNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let config: ScorerConfig =
            toml::from_str(&content).map_err(|e| ScoreError::invalid_config(path, e))?;

        for role in ArtifactRole::ALL {
            if config.artifacts.get(role).as_os_str().is_empty() {
                return Err(ScoreError::invalid_config(
                    path,
                    format!("artifact path for {} is empty", role),
                ));
            }
        }

        Ok(config)
    }

    /// Resolve the configuration for a project root.
    ///
    /// An explicit path must exist and parse. Otherwise `ruthscore.toml` in
    /// `root` is used when it loads, and the defaults when it is absent or
    /// invalid.
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            return Self::load(&path);
        }

        let implicit = root.join(CONFIG_FILE);
        if !implicit.exists() {
            return Ok(Self::default());
        }

        match Self::load(&implicit) {
            Ok(config) => {
                tracing::debug!(path = %implicit.display(), "using project config");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(
                    path = %implicit.display(),
                    error = %e,
                    "ignoring invalid project config, using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Serialize configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScoreError::Other(format!("failed to serialize config: {}", e)))
    }
}
