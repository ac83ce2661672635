//! Import resolution for one root file.
//!
//! A [`Linker`] owns the whole state of one job: the ordered entries, the
//! set of files already visited, and the warnings raised on the way. Entries
//! are appended depth-first, each file after everything it imports, so
//! dependencies always precede their dependents in the output.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use url::Url;

use crate::assemble;
use crate::config::default_library_dir;
use crate::directive;
use crate::error::LinkerError;
use crate::fetch::RemoteFetcher;
use crate::format::FormatSpec;
use crate::links;
use crate::path::{self, CanonicalPath, PathError, PathResolver};

/// Options for one linking job
#[derive(Debug, Clone)]
pub struct LinkerOptions {
    /// Prepended to the root file name to name the output
    pub prefix: String,
    /// Strip comments from every linked file
    pub strip_comments: bool,
    /// Directory backing the `zeta://` scheme
    pub library_dir: PathBuf,
}

impl Default for LinkerOptions {
    fn default() -> Self {
        Self {
            prefix: "_".to_string(),
            strip_comments: false,
            library_dir: default_library_dir(),
        }
    }
}

impl LinkerOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_strip_comments(mut self, strip_comments: bool) -> Self {
        self.strip_comments = strip_comments;
        self
    }

    pub fn with_library_dir(mut self, library_dir: impl Into<PathBuf>) -> Self {
        self.library_dir = library_dir.into();
        self
    }
}

/// One processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub path: CanonicalPath,
    /// Importing file; `None` for the root
    pub parent: Option<CanonicalPath>,
    /// Source after directive removal, link rewriting and comment stripping
    pub text: String,
}

impl ResolvedEntry {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Report from a finished linking job
#[derive(Debug, Clone)]
pub struct LinkReport {
    pub root: PathBuf,
    pub output: PathBuf,
    /// Non-blank entries written to the output
    pub entries: usize,
    pub warnings: Vec<String>,
}

/// Resolution state for a single root file.
#[derive(Debug)]
pub struct Linker {
    root: PathBuf,
    root_path: CanonicalPath,
    file_name: String,
    format: &'static FormatSpec,
    resolver: PathResolver,
    fetcher: RemoteFetcher,
    options: LinkerOptions,
    entries: Vec<ResolvedEntry>,
    visited: HashSet<CanonicalPath>,
    /// Files whose resolution is in progress, outermost first
    chain: Vec<CanonicalPath>,
    /// Cache file each remote import was read from
    cache_names: HashMap<PathBuf, Url>,
    warnings: Vec<String>,
}

impl Linker {
    /// Prepare a job for `root`. Fails before reading anything when the
    /// format is not supported.
    pub fn new(root: impl Into<PathBuf>, options: LinkerOptions) -> Result<Self, LinkerError> {
        let root = root.into();
        let format = FormatSpec::for_path(&root)?;

        let root_error = |source: PathError| LinkerError::Path {
            target: root.display().to_string(),
            parent: None,
            source,
        };
        let absolute = std::path::absolute(&root).map_err(|source| LinkerError::Read {
            path: root.display().to_string(),
            parent: None,
            source,
        })?;
        let absolute = path::normalize(&absolute).map_err(root_error)?;
        let file_name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                root_error(PathError::NoFileName {
                    path: absolute.clone(),
                })
            })?;
        let base_dir = absolute.parent().unwrap_or_else(|| Path::new("/"));

        let library_dir = std::path::absolute(&options.library_dir).map_err(|source| {
            LinkerError::Read {
                path: options.library_dir.display().to_string(),
                parent: None,
                source,
            }
        })?;
        let resolver = PathResolver::new(base_dir, &library_dir).map_err(root_error)?;
        let fetcher = RemoteFetcher::new(resolver.base_dir().to_path_buf());

        Ok(Self {
            root_path: CanonicalPath::Local(PathBuf::from(&file_name)),
            root,
            file_name,
            format,
            resolver,
            fetcher,
            options,
            entries: Vec::new(),
            visited: HashSet::new(),
            chain: Vec::new(),
            cache_names: HashMap::new(),
            warnings: Vec::new(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        self.resolver.base_dir()
    }

    /// `<prefix><root file name>` beside the root file
    pub fn output_path(&self) -> PathBuf {
        self.base_dir()
            .join(format!("{}{}", self.options.prefix, self.file_name))
    }

    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Resolve the root and everything it imports. Failing to read the root
    /// is fatal.
    pub fn resolve(&mut self) -> Result<(), LinkerError> {
        let root = self.root_path.clone();
        let source = self.read(&root, None)?;
        self.visited.insert(root.clone());
        self.resolve_tree(root, None, source)
    }

    /// Resolve, assemble and write the merged output.
    pub fn link(mut self) -> Result<LinkReport, LinkerError> {
        tracing::info!(root = %self.root.display(), "Packing");
        self.resolve()?;

        let content = assemble::assemble(&self.entries, self.format);
        let output = self.output_path();
        assemble::write_output(&output, &content)?;
        tracing::info!(output = %output.display(), "Linked file saved");

        Ok(LinkReport {
            root: self.root,
            output,
            entries: self.entries.iter().filter(|e| !e.is_blank()).count(),
            warnings: self.warnings,
        })
    }

    fn resolve_tree(
        &mut self,
        path: CanonicalPath,
        parent: Option<CanonicalPath>,
        source: String,
    ) -> Result<(), LinkerError> {
        self.chain.push(path.clone());
        let current_dir = path.current_dir();

        let directives = directive::scan(&self.format.import_pattern, &source);
        for directive in &directives {
            let child = match self.resolver.resolve(&directive.target, current_dir) {
                Ok(child) => child,
                Err(err) => {
                    self.warn(format!(
                        "{path}: cannot resolve import '{}': {err}",
                        directive.target
                    ));
                    continue;
                }
            };

            if self.visited.contains(&child) {
                if self.chain.contains(&child) {
                    let cycle: Vec<String> = self
                        .chain
                        .iter()
                        .skip_while(|p| **p != child)
                        .map(ToString::to_string)
                        .collect();
                    self.warn(format!(
                        "{path}: circular import of '{child}' ({} -> {child})",
                        cycle.join(" -> ")
                    ));
                } else {
                    tracing::info!(file = %path, import = %child, "Already imported");
                }
                continue;
            }

            if let CanonicalPath::Remote(url) = &child {
                self.claim_cache_name(&path, url);
            }

            let child_source = match self.read(&child, Some(&path)) {
                Ok(text) => text,
                Err(err @ LinkerError::Fetch { .. }) => {
                    self.warn(format!("{path}: cannot fetch import '{child}'. ({err})"));
                    continue;
                }
                Err(err) if err.is_missing_target() => {
                    self.warn(format!("{path}: import file '{child}' does not exist. ({err})"));
                    continue;
                }
                Err(err) => return Err(err),
            };

            self.visited.insert(child.clone());
            tracing::debug!(file = %path, import = %child, "Resolving import");
            self.resolve_tree(child, Some(path.clone()), child_source)?;
        }

        let mut text = directive::remove(&source, &directives);

        if let Some(pattern) = &self.format.link_pattern {
            let rewrite = links::rewrite_links(
                &text,
                pattern,
                self.format.link_ignore,
                current_dir,
                self.resolver.base_dir(),
            );
            text = rewrite.text;
            self.warnings.extend(rewrite.warnings);
        }

        if self.options.strip_comments {
            if let Some(strip) = self.format.strip_comments {
                text = strip(&text);
            }
        }

        self.chain.pop();
        self.entries.push(ResolvedEntry { path, parent, text });
        Ok(())
    }

    fn read(
        &self,
        path: &CanonicalPath,
        parent: Option<&CanonicalPath>,
    ) -> Result<String, LinkerError> {
        let parent = parent.map(ToString::to_string);
        let local = match path {
            CanonicalPath::Local(relative) => self.resolver.absolute(relative),
            CanonicalPath::Remote(url) => {
                self.fetcher
                    .fetch(url)
                    .map_err(|source| LinkerError::Fetch {
                        url: url.to_string(),
                        parent: parent.clone(),
                        source,
                    })?
            }
        };

        std::fs::read_to_string(&local).map_err(|source| LinkerError::Read {
            path: path.to_string(),
            parent,
            source,
        })
    }

    /// Remote imports share one flat cache directory, so two URLs with the
    /// same last segment read the same file.
    fn claim_cache_name(&mut self, path: &CanonicalPath, url: &Url) {
        let Ok(local) = self.fetcher.cache_path(url) else {
            return;
        };
        let owner = self
            .cache_names
            .entry(local.clone())
            .or_insert_with(|| url.clone());
        if owner != url {
            let message = format!(
                "{path}: cache file '{}' for '{url}' already holds '{owner}'",
                local.display()
            );
            self.warn(message);
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}
