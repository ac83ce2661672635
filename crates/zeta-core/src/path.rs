//! Canonical paths and the addressing schemes accepted by import directives.
//!
//! A canonical path is the identity of a file inside one linking job. Local
//! files are lexically normalized and expressed relative to the job's base
//! directory (the root file's directory); remote files are identified by
//! their URL.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Prefix of targets resolved against the library directory.
pub const LIBRARY_SCHEME: &str = "zeta://";

/// Prefixes of targets fetched over the network.
pub const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

#[derive(Debug, Error)]
pub enum PathError {
    #[error("'{}' climbs above the filesystem root", .path.display())]
    EscapesRoot { path: PathBuf },

    #[error("'{}' cannot be expressed relative to '{}'", .path.display(), .base.display())]
    NotRelative { path: PathBuf, base: PathBuf },

    #[error("'{}' has no file name", .path.display())]
    NoFileName { path: PathBuf },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Identity of a file within a linking job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalPath {
    /// Relative to the job's base directory.
    Local(PathBuf),
    Remote(Url),
}

/// Location relative targets are resolved against.
#[derive(Debug, Clone, Copy)]
pub enum CurrentDir<'a> {
    /// Directory relative to the base directory (empty for the base itself).
    Local(&'a Path),
    /// URL of the remote file doing the importing.
    Remote(&'a Url),
}

impl CanonicalPath {
    /// Directory that targets found inside this file resolve against.
    pub fn current_dir(&self) -> CurrentDir<'_> {
        match self {
            CanonicalPath::Local(path) => {
                CurrentDir::Local(path.parent().unwrap_or_else(|| Path::new("")))
            }
            CanonicalPath::Remote(url) => CurrentDir::Remote(url),
        }
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalPath::Local(path) => f.write_str(&to_slash(path)),
            CanonicalPath::Remote(url) => f.write_str(url.as_str()),
        }
    }
}

impl fmt::Display for CurrentDir<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentDir::Local(path) => f.write_str(&to_slash(path)),
            CurrentDir::Remote(url) => f.write_str(url.as_str()),
        }
    }
}

/// Turns raw import targets into canonical paths for one job.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
    library_dir: PathBuf,
}

impl PathResolver {
    /// Both directories must be absolute.
    pub fn new(base_dir: &Path, library_dir: &Path) -> Result<Self, PathError> {
        Ok(Self {
            base_dir: normalize(base_dir)?,
            library_dir: normalize(library_dir)?,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a raw directive target found in a file living in `current_dir`.
    ///
    /// Schemes are tried in order: remote URL, root-absolute (`/`), library
    /// (`zeta://`), then plain relative. Inside a remote file, root-absolute
    /// and relative targets are joined onto the file's URL instead.
    pub fn resolve(
        &self,
        raw: &str,
        current_dir: CurrentDir<'_>,
    ) -> Result<CanonicalPath, PathError> {
        if is_remote(raw) {
            return Ok(CanonicalPath::Remote(Url::parse(raw)?));
        }

        if let Some(rest) = raw.strip_prefix(LIBRARY_SCHEME) {
            return self.localize(&self.library_dir.join(rest.trim_start_matches('/')));
        }

        match current_dir {
            CurrentDir::Remote(url) => Ok(CanonicalPath::Remote(url.join(raw)?)),
            CurrentDir::Local(dir) => match raw.strip_prefix('/') {
                Some(rest) => self.localize(&self.base_dir.join(rest.trim_start_matches('/'))),
                None => self.localize(&self.base_dir.join(dir).join(raw)),
            },
        }
    }

    /// Canonical form of an absolute filesystem path.
    pub fn localize(&self, path: &Path) -> Result<CanonicalPath, PathError> {
        let normalized = normalize(path)?;
        Ok(CanonicalPath::Local(relative_to(
            &normalized,
            &self.base_dir,
        )?))
    }

    /// Filesystem location of a local canonical path.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn is_remote(target: &str) -> bool {
    REMOTE_SCHEMES
        .iter()
        .any(|scheme| target.starts_with(scheme))
}

/// Lexically normalize a path by resolving `.` and `..` components without filesystem access.
///
/// Relative paths keep leading `..` components. An absolute path whose `..`
/// would climb above its root is an error.
pub fn normalize(path: &Path) -> Result<PathBuf, PathError> {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {
                    return Err(PathError::EscapesRoot {
                        path: path.to_path_buf(),
                    });
                }
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    components.push(component);
                }
            },
            c => components.push(c),
        }
    }

    Ok(components.iter().collect())
}

/// Express `path` relative to `base`. Both must be normalized and share the
/// same root.
pub fn relative_to(path: &Path, base: &Path) -> Result<PathBuf, PathError> {
    let not_relative = || PathError::NotRelative {
        path: path.to_path_buf(),
        base: base.to_path_buf(),
    };

    if path.is_absolute() != base.is_absolute() {
        return Err(not_relative());
    }

    let path_components: Vec<Component<'_>> = path.components().collect();
    let base_components: Vec<Component<'_>> = base.components().collect();

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    // Differing roots or drive prefixes cannot be bridged with `..`.
    let anchored = |c: &Component<'_>| matches!(c, Component::Prefix(_) | Component::RootDir);
    if path_components[common..].iter().any(anchored)
        || base_components[common..].iter().any(anchored)
    {
        return Err(not_relative());
    }
    if base_components[common..]
        .iter()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(not_relative());
    }

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    Ok(relative)
}

/// Render a relative path with `/` separators; the empty path renders as `.`.
pub fn to_slash(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
