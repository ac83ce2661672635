//! Configuration for linking jobs
//!
//! Settings come from three layers, highest precedence first:
//! - Command-line overrides
//! - A `zeta.toml` file (explicit, project, or global)
//! - Built-in defaults

pub mod parser;
pub mod paths;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::linker::LinkerOptions;

pub use parser::{parse_zeta_toml, parse_zeta_toml_str};
pub use paths::{config_candidates, default_library_dir, discover_config};

/// Contents of `zeta.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZetaConfig {
    /// Output file name prefix
    #[serde(default)]
    pub prefix: Option<String>,
    /// Strip comments from linked content
    #[serde(default)]
    pub no_comments: Option<bool>,
    /// Directory backing the `zeta://` scheme
    #[serde(default)]
    pub library_dir: Option<PathBuf>,
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub prefix: Option<String>,
    pub no_comments: bool,
    pub library_dir: Option<PathBuf>,
}

impl ZetaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject settings that would make linking destructive or ambiguous.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(prefix) = &self.prefix {
            validate_prefix(prefix)?;
        }
        Ok(())
    }

    /// Merge with command-line overrides into job options.
    ///
    /// A relative `library_dir` from the file is taken relative to
    /// `config_dir`, the directory holding the file.
    pub fn into_options(
        self,
        overrides: ConfigOverrides,
        config_dir: Option<&Path>,
    ) -> anyhow::Result<LinkerOptions> {
        let mut options = LinkerOptions::default();

        if let Some(prefix) = overrides.prefix.or(self.prefix) {
            validate_prefix(&prefix)?;
            options.prefix = prefix;
        }

        options.strip_comments = overrides.no_comments || self.no_comments.unwrap_or(false);

        if let Some(dir) = overrides.library_dir {
            options.library_dir = dir;
        } else if let Some(dir) = self.library_dir {
            options.library_dir = match config_dir {
                Some(base) if dir.is_relative() => base.join(dir),
                _ => dir,
            };
        }

        Ok(options)
    }
}

fn validate_prefix(prefix: &str) -> anyhow::Result<()> {
    if prefix.is_empty() {
        anyhow::bail!("prefix must not be empty: the output would overwrite its root file");
    }
    if prefix.contains(['/', '\\']) {
        anyhow::bail!("prefix must not contain path separators: '{}'", prefix);
    }
    Ok(())
}
