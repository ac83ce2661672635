//! Config file discovery and default locations.

use std::path::{Path, PathBuf};

use super::{ZetaConfig, parse_zeta_toml};

pub const CONFIG_FILE_NAME: &str = "zeta.toml";

/// Candidate config files in lookup order: project directory, then the
/// user's global config directory.
pub fn config_candidates(project_root: &Path, global_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![project_root.join(CONFIG_FILE_NAME)];
    if let Some(global_dir) = global_dir {
        candidates.push(global_dir.join(CONFIG_FILE_NAME));
    }
    candidates
}

/// Load the first config that applies.
///
/// An explicit path must exist. Otherwise the first existing candidate is
/// used, and no file at all yields the defaults. Returns the config with the
/// directory it was loaded from.
pub fn discover_config(
    explicit: Option<&Path>,
    project_root: &Path,
) -> anyhow::Result<(ZetaConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let config = parse_zeta_toml(path)?;
        return Ok((config, path.parent().map(Path::to_path_buf)));
    }

    let global_dir = dirs::config_dir().map(|dir| dir.join("zeta"));
    for candidate in config_candidates(project_root, global_dir.as_deref()) {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Loading config");
            let config = parse_zeta_toml(&candidate)?;
            return Ok((config, candidate.parent().map(Path::to_path_buf)));
        }
    }

    Ok((ZetaConfig::new(), None))
}

/// Library directory used when none is configured.
pub fn default_library_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("zeta").join("lib"))
        .unwrap_or_else(|| PathBuf::from("zetalib"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn candidates_prefer_project() {
        let candidates = config_candidates(Path::new("/work"), Some(Path::new("/home/u/.config/zeta")));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/work/zeta.toml"),
                PathBuf::from("/home/u/.config/zeta/zeta.toml"),
            ]
        );
    }

    #[test]
    fn discover_reads_project_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "prefix = \"p.\"\n").unwrap();

        let (config, dir) = discover_config(None, temp.path()).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("p."));
        assert_eq!(dir.as_deref(), Some(temp.path()));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = discover_config(Some(&temp.path().join("nope.toml")), temp.path());
        assert!(result.is_err());
    }
}
