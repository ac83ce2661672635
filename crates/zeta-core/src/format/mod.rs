//! Supported source formats.
//!
//! Each format is described by a [`FormatSpec`]: how import directives look,
//! which resource links need rewriting, how to write a comment, and how to
//! strip comments. Formats are selected by file extension.

pub mod css;
pub mod js;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::LinkerError;

/// Syntax rules for one source format.
#[derive(Debug)]
pub struct FormatSpec {
    /// Extension without the leading dot.
    pub extension: &'static str,
    /// Matches one import directive; group 1 captures the target.
    pub import_pattern: Regex,
    /// Matches one resource link; group 1 captures the target.
    pub link_pattern: Option<Regex>,
    /// Link targets starting with any of these are left untouched.
    pub link_ignore: &'static [&'static str],
    pub comment_open: &'static str,
    pub comment_close: &'static str,
    pub strip_comments: Option<fn(&str) -> String>,
}

static FORMATS: LazyLock<[FormatSpec; 2]> = LazyLock::new(|| [css::spec(), js::spec()]);

impl FormatSpec {
    pub fn for_extension(extension: &str) -> Option<&'static FormatSpec> {
        FORMATS.iter().find(|spec| spec.extension == extension)
    }

    pub fn for_path(path: &Path) -> Result<&'static FormatSpec, LinkerError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::for_extension)
            .ok_or_else(|| LinkerError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// One line comment in this format's syntax.
    pub fn comment(&self, text: &str) -> String {
        format!("{}{}{}\n", self.comment_open, text, self.comment_close)
    }
}

pub fn is_supported(path: &Path) -> bool {
    FormatSpec::for_path(path).is_ok()
}
