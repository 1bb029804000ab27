//! Project root resolution

use std::env;
use std::path::PathBuf;

/// Resolve the project root the artifact paths are relative to.
///
/// An explicit root wins. Otherwise the current working directory is used,
/// or "." if that cannot be determined.
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}
