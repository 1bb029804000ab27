//! Artifact loading
//!
//! An artifact is one of the four source files of the agent implementation,
//! identified by its logical role. Loading never fails: a file that is
//! missing or unreadable is simply absent, and the rule checks that depend
//! on it score zero.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ArtifactPaths;

/// Logical role of an inspected artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactRole {
    /// Telegram callback handler that sends the first intake message
    IntakeHandler,
    /// System prompt builder holding the behavioral rules
    SystemPrompt,
    /// Response validator with word, question and frustration logic
    ResponseValidator,
    /// Message pipeline wiring the validator into each turn
    MessagePipeline,
}

impl ArtifactRole {
    /// All roles, in the order they are loaded
    pub const ALL: [ArtifactRole; 4] = [
        ArtifactRole::IntakeHandler,
        ArtifactRole::SystemPrompt,
        ArtifactRole::ResponseValidator,
        ArtifactRole::MessagePipeline,
    ];

    /// Stable identifier used in config keys and machine output
    pub fn id(&self) -> &'static str {
        match self {
            ArtifactRole::IntakeHandler => "intake-handler",
            ArtifactRole::SystemPrompt => "system-prompt",
            ArtifactRole::ResponseValidator => "response-validator",
            ArtifactRole::MessagePipeline => "message-pipeline",
        }
    }

    /// Path of the artifact relative to the project root when not configured
    pub fn default_path(&self) -> &'static str {
        match self {
            ArtifactRole::IntakeHandler => "src/adapters/telegram/handlers/callbackHandler.ts",
            ArtifactRole::SystemPrompt => "src/services/ai/systemPrompts.ts",
            ArtifactRole::ResponseValidator => "src/utils/responseValidator.ts",
            ArtifactRole::MessagePipeline => "src/core/pipeline/messagePipeline.ts",
        }
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Capability for reading artifact text by role.
///
/// Returning `None` means the artifact is absent; implementations must not
/// treat absence as an error.
pub trait ArtifactLoader {
    fn load(&self, role: ArtifactRole) -> Option<String>;

    /// Short name used in "not found" issues (the file name, by default)
    fn display_name(&self, role: ArtifactRole) -> String {
        file_name(role.default_path())
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Loads artifacts from the filesystem relative to a project root
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
    paths: ArtifactPaths,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>, paths: ArtifactPaths) -> Self {
        Self {
            root: root.into(),
            paths,
        }
    }

    /// Absolute (or root-relative) path of the artifact for a role
    pub fn path_for(&self, role: ArtifactRole) -> PathBuf {
        let rel = self.paths.get(role);
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

impl ArtifactLoader for FsLoader {
    fn load(&self, role: ArtifactRole) -> Option<String> {
        let path = self.path_for(role);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(role = %role, path = %path.display(), bytes = text.len(), "artifact_loaded");
                Some(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(role = %role, path = %path.display(), "artifact_missing");
                None
            }
            Err(e) => {
                warn!(
                    role = %role,
                    path = %path.display(),
                    error = %e,
                    "artifact unreadable, treating as absent"
                );
                None
            }
        }
    }

    fn display_name(&self, role: ArtifactRole) -> String {
        file_name(&self.paths.get(role).to_string_lossy())
    }
}

/// In-memory artifacts, for tests and library callers
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    texts: HashMap<ArtifactRole, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: ArtifactRole, text: impl Into<String>) -> Self {
        self.texts.insert(role, text.into());
        self
    }

    pub fn insert(&mut self, role: ArtifactRole, text: impl Into<String>) {
        self.texts.insert(role, text.into());
    }

    pub fn remove(&mut self, role: ArtifactRole) -> Option<String> {
        self.texts.remove(&role)
    }
}

impl ArtifactLoader for MemoryLoader {
    fn load(&self, role: ArtifactRole) -> Option<String> {
        self.texts.get(&role).cloned()
    }
}

/// Snapshot of every artifact, read once at the start of a run
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    entries: HashMap<ArtifactRole, Artifact>,
}

#[derive(Debug, Clone)]
struct Artifact {
    name: String,
    text: Option<String>,
}

impl ArtifactSet {
    pub fn load(loader: &dyn ArtifactLoader) -> Self {
        let entries = ArtifactRole::ALL
            .iter()
            .map(|&role| {
                let artifact = Artifact {
                    name: loader.display_name(role),
                    text: loader.load(role),
                };
                (role, artifact)
            })
            .collect();
        Self { entries }
    }

    /// Text of the artifact, or `None` when absent
    pub fn text(&self, role: ArtifactRole) -> Option<&str> {
        self.entries.get(&role).and_then(|a| a.text.as_deref())
    }

    /// Display name of the artifact for issue messages
    pub fn name(&self, role: ArtifactRole) -> &str {
        self.entries
            .get(&role)
            .map(|a| a.name.as_str())
            .unwrap_or_else(|| role.id())
    }

    pub fn is_present(&self, role: ArtifactRole) -> bool {
        self.text(role).is_some()
    }
}
