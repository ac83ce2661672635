//! Resource link rewriting.
//!
//! Linked files are merged into a single output in the base directory, so a
//! relative `url(...)` written in `css/theme/a.css` must be re-expressed
//! relative to the base directory to keep pointing at the same asset.

use std::path::Path;

use regex::Regex;

use crate::path::{self, CurrentDir, PathError};

/// Result of rewriting the links of one text.
#[derive(Debug, Clone, Default)]
pub struct Rewrite {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Rewrite every link matched by `pattern` to be relative to `base_dir`.
///
/// Targets starting with an `ignore` prefix, with `#`, with a scheme-less
/// `data:`, or (in local files) with `/` are left byte-for-byte unchanged.
/// Only the captured target is replaced; the surrounding syntax is kept.
/// Links that cannot be relocated are kept and reported as warnings.
pub fn rewrite_links(
    text: &str,
    pattern: &Regex,
    ignore: &[&str],
    current_dir: CurrentDir<'_>,
    base_dir: &Path,
) -> Rewrite {
    let mut rewrite = Rewrite {
        text: String::with_capacity(text.len()),
        warnings: Vec::new(),
    };
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let Some(target) = caps.get(1) else {
            continue;
        };
        let raw = target.as_str();
        if is_ignored(raw, ignore, current_dir) {
            continue;
        }

        match relocate(raw, current_dir, base_dir) {
            Ok(relocated) => {
                rewrite.text.push_str(&text[last..target.start()]);
                rewrite.text.push_str(&relocated);
                last = target.end();
            }
            Err(err) => {
                tracing::warn!(current_dir = %current_dir, target = raw, error = %err, "Url error");
                rewrite
                    .warnings
                    .push(format!("Url error: [{current_dir}] -- {raw}: {err}"));
            }
        }
    }

    rewrite.text.push_str(&text[last..]);
    rewrite
}

/// Root-absolute targets are only kept in local files; in a remote file
/// they are joined onto the file's URL like imports are.
fn is_ignored(target: &str, ignore: &[&str], current_dir: CurrentDir<'_>) -> bool {
    let root_absolute = target.starts_with('/') && matches!(current_dir, CurrentDir::Local(_));
    ignore.iter().any(|prefix| target.starts_with(prefix))
        || root_absolute
        || target.starts_with('#')
        || target.starts_with("data:")
}

/// `target` as seen from `base_dir` instead of `current_dir`.
fn relocate(target: &str, current_dir: CurrentDir<'_>, base_dir: &Path) -> Result<String, PathError> {
    match current_dir {
        CurrentDir::Local(dir) => {
            let absolute = path::normalize(&base_dir.join(dir).join(target))?;
            let relative = path::relative_to(&absolute, base_dir)?;
            Ok(path::to_slash(&relative))
        }
        CurrentDir::Remote(url) => Ok(url.join(target)?.to_string()),
    }
}
