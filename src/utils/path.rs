//! Path utilities: expand ~ in configured paths and build export targets.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Resolve the output file for an export: an explicit path wins, otherwise
/// `file_name` inside `dir` (or the working directory).
pub fn resolve_output(explicit: Option<&str>, dir: Option<&str>, file_name: &str) -> PathBuf {
    match (explicit, dir) {
        (Some(p), _) => expand_tilde(p),
        (None, Some(d)) => expand_tilde(d).join(file_name),
        (None, None) => Path::new(".").join(file_name),
    }
}
