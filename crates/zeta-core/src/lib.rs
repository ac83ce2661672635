//! Zeta Core Library
//!
//! Links stylesheets and scripts: resolves their import directives
//! recursively and writes one merged, dependency-ordered file per root.

pub mod assemble;
pub mod commands;
pub mod config;
pub mod directive;
pub mod error;
pub mod fetch;
pub mod format;
pub mod linker;
pub mod links;
pub mod path;
pub mod route;

/// Re-exports of commonly used types
pub mod prelude {
    // Linking
    pub use crate::linker::{LinkReport, Linker, LinkerOptions, ResolvedEntry};

    // Commands
    pub use crate::commands::{LinkCommand, LinkOptions, LinkOutcome};

    // Configuration
    pub use crate::config::{ConfigOverrides, ZetaConfig};

    // Formats and paths
    pub use crate::format::FormatSpec;
    pub use crate::path::{CanonicalPath, PathResolver};

    // Errors
    pub use crate::error::LinkerError;
    pub use crate::fetch::FetchError;
}
