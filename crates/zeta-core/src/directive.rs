//! Import directive scanning.
//!
//! Finding directives, resolving what they name, and removing them from the
//! text are separate steps: [`scan`] collects every directive with its span,
//! the linker resolves the targets, and [`remove`] rebuilds the text without
//! the directive spans.

use std::ops::Range;

use regex::Regex;

/// One import directive found in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Byte range of the whole directive.
    pub span: Range<usize>,
    /// Raw target as written.
    pub target: String,
}

/// Every match of `pattern`, in textual order.
pub fn scan(pattern: &Regex, source: &str) -> Vec<Directive> {
    pattern
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.get(1)?;
            Some(Directive {
                span: whole.range(),
                target: target.as_str().to_string(),
            })
        })
        .collect()
}

/// `source` with every directive span cut out.
pub fn remove(source: &str, directives: &[Directive]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for directive in directives {
        out.push_str(&source[last..directive.span.start]);
        last = directive.span.end;
    }
    out.push_str(&source[last..]);
    out
}
