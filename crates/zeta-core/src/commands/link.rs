//! Link command implementation.
//!
//! Links every root selected from the input path. Each root is an
//! independent job; a fatal error aborts only that root.

use std::path::PathBuf;

use crate::error::LinkerError;
use crate::linker::{LinkReport, Linker, LinkerOptions};
use crate::route::collect_roots;

/// Options for the link command
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Root file or directory of roots
    pub path: PathBuf,
    /// Options applied to every job
    pub linker: LinkerOptions,
}

impl LinkOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            linker: LinkerOptions::default(),
        }
    }

    pub fn with_linker(mut self, linker: LinkerOptions) -> Self {
        self.linker = linker;
        self
    }
}

/// Result of linking one root
#[derive(Debug)]
pub struct LinkOutcome {
    pub root: PathBuf,
    pub result: Result<LinkReport, LinkerError>,
}

impl LinkOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Link command orchestrator
#[derive(Debug, Default)]
pub struct LinkCommand;

impl LinkCommand {
    pub fn new() -> Self {
        Self
    }

    /// Link every root under `options.path`.
    ///
    /// Fails only when the input path itself cannot be expanded; per-root
    /// failures are returned in the outcomes.
    pub fn execute(&self, options: &LinkOptions) -> anyhow::Result<Vec<LinkOutcome>> {
        let roots = collect_roots(&options.path, &options.linker.prefix)?;
        if roots.is_empty() {
            tracing::warn!(path = %options.path.display(), "No files to link");
        }

        let outcomes = roots
            .into_iter()
            .map(|root| {
                let result = Linker::new(&root, options.linker.clone()).and_then(Linker::link);
                if let Err(err) = &result {
                    tracing::error!(root = %root.display(), error = %err, "Linking failed");
                }
                LinkOutcome { root, result }
            })
            .collect();

        Ok(outcomes)
    }
}
