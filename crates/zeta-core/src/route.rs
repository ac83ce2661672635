//! Root file selection.
//!
//! A file argument is its own single root. A directory argument selects
//! every regular file directly inside it that has a supported extension and
//! is not itself a linker output (its name does not start with the prefix).

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::format;

/// Expand `path` into the roots to link, sorted by name.
pub fn collect_roots(path: &Path, prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("'{}' does not exist", path.display());
    }

    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut roots = Vec::new();
    let entries = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", path.display()))?;
        let candidate = entry.path();
        if is_link_root(&candidate, prefix) {
            roots.push(candidate);
        }
    }
    roots.sort();
    Ok(roots)
}

/// True for a supported, not-yet-linked regular file.
pub fn is_link_root(path: &Path, prefix: &str) -> bool {
    let already_linked = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_none_or(|name| name.starts_with(prefix));
    path.is_file() && !already_linked && format::is_supported(path)
}
