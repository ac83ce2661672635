//! Error types for linking jobs.

use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchError;
use crate::path::PathError;

/// Errors that abort the linking of one root file.
///
/// Messages carry the importing file as a `parent: ` prefix when there is
/// one, so a failure deep in the import chain can be traced back.
#[derive(Debug, Error)]
pub enum LinkerError {
    /// The root file's extension has no registered format.
    #[error("Unknown format file: '{}'", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A local source could not be read.
    #[error("{}cannot read '{path}': {source}", parent_prefix(.parent))]
    Read {
        path: String,
        parent: Option<String>,
        #[source]
        source: std::io::Error,
    },

    /// A remote source could not be fetched into the cache.
    #[error("{}cannot fetch '{url}': {source}", parent_prefix(.parent))]
    Fetch {
        url: String,
        parent: Option<String>,
        #[source]
        source: FetchError,
    },

    /// A target could not be turned into a canonical path.
    #[error("{}cannot resolve '{target}': {source}", parent_prefix(.parent))]
    Path {
        target: String,
        parent: Option<String>,
        #[source]
        source: PathError,
    },

    /// The merged output could not be written.
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LinkerError {
    /// True when the failure means the imported file simply is not there.
    ///
    /// Only these failures are tolerated for child imports; anything else
    /// aborts the job.
    pub fn is_missing_target(&self) -> bool {
        match self {
            LinkerError::Read { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            LinkerError::Fetch { .. } => true,
            _ => false,
        }
    }
}

fn parent_prefix(parent: &Option<String>) -> String {
    match parent {
        Some(parent) => format!("{parent}: "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_parent() {
        let err = LinkerError::Read {
            path: "b.css".to_string(),
            parent: Some("a.css".to_string()),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let message = err.to_string();
        assert!(message.starts_with("a.css: "));
        assert!(message.contains("'b.css'"));
        assert!(err.is_missing_target());
    }

    #[test]
    fn root_read_error_has_no_prefix() {
        let err = LinkerError::Read {
            path: "a.css".to_string(),
            parent: None,
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("cannot read 'a.css'"));
        assert!(!err.is_missing_target());
    }

    #[test]
    fn unsupported_format_is_not_missing() {
        let err = LinkerError::UnsupportedFormat {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(err.to_string(), "Unknown format file: 'notes.txt'");
        assert!(!err.is_missing_target());
    }
}
