//! Marker matching
//!
//! A marker is textual evidence that an artifact implements a rule. In the
//! default [`MatchMode::Literal`] mode every marker is a plain substring
//! search, which is compatible with existing score history but can
//! false-positive (any `1` in the file satisfies a numbered option).
//!
//! [`MatchMode::Strict`] is an opt-in deviation: constants must be declared
//! as `NAME = VALUE` and numbered options must start a list line. Plain
//! literals match the same way in both modes.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How markers are matched against artifact text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain substring search for every marker part
    #[default]
    Literal,
    /// Structural patterns for constants and numbered options
    Strict,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Literal => write!(f, "literal"),
            MatchMode::Strict => write!(f, "strict"),
        }
    }
}

/// A unit of textual evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A single substring
    Literal(&'static str),
    /// Every substring must be present
    AllOf(&'static [&'static str]),
    /// A named constant holding a literal value
    Constant {
        name: &'static str,
        value: &'static str,
    },
    /// Numbered menu options, e.g. `1`, `2`, `3`
    NumberedOptions(&'static [&'static str]),
}

impl Marker {
    /// Whether the marker is present in `text` under `mode`
    pub fn is_present(&self, text: &str, mode: MatchMode) -> bool {
        match (self, mode) {
            (Marker::Literal(s), _) => text.contains(s),
            (Marker::AllOf(parts), _) => parts.iter().all(|p| text.contains(p)),
            (Marker::Constant { name, value }, MatchMode::Literal) => {
                text.contains(name) && text.contains(value)
            }
            (Marker::Constant { name, value }, MatchMode::Strict) => {
                matches_pattern(&constant_pattern(name, value), text)
            }
            (Marker::NumberedOptions(options), MatchMode::Literal) => {
                options.iter().all(|o| text.contains(o))
            }
            (Marker::NumberedOptions(options), MatchMode::Strict) => options
                .iter()
                .all(|o| matches_pattern(&numbered_option_pattern(o), text)),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Literal(s) => write!(f, "{}", s),
            Marker::AllOf(parts) => write!(f, "{}", parts.join(" + ")),
            Marker::Constant { name, value } => write!(f, "{} = {}", name, value),
            Marker::NumberedOptions(options) => write!(f, "options {}", options.join("/")),
        }
    }
}

/// `NAME`, an optional type annotation, `=`, then `VALUE` ending on a word boundary
fn constant_pattern(name: &str, value: &str) -> String {
    format!(
        r"\b{}\b\s*(?::\s*[\w<>\[\]]+\s*)?=\s*{}\b",
        regex::escape(name),
        regex::escape(value)
    )
}

/// An option number at the start of a line, followed by list punctuation or
/// a keycap sign (raw, or written as a `\u20E3` escape)
fn numbered_option_pattern(option: &str) -> String {
    format!(
        concat!(
            r"(?m)^[ \t]*(?:[-*][ \t]*)?\(?{}",
            r"(?:[.):]|[ \t]+-|\x{{FE0F}}?\x{{20E3}}|(?:\\u(?:FE0F|fe0f))?\\u20[Ee]3)"
        ),
        regex::escape(option)
    )
}

/// Compiled strict patterns, keyed by pattern source
static PATTERNS: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();

fn compiled(pattern: &str) -> Option<Regex> {
    let cache = PATTERNS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = match cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(re) = cache.get(pattern) {
        return Some(re.clone());
    }

    match Regex::new(pattern) {
        Ok(re) => {
            cache.insert(pattern.to_string(), re.clone());
            Some(re)
        }
        Err(e) => {
            tracing::error!(pattern, error = %e, "invalid strict marker pattern");
            None
        }
    }
}

fn matches_pattern(pattern: &str, text: &str) -> bool {
    compiled(pattern).is_some_and(|re| re.is_match(text))
}
