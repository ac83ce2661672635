//! Script format.

use regex::Regex;

use super::FormatSpec;

const IMPORT_PATTERN: &str = r#"(?m)^require\(['"]([^'"]+)['"]\)\s*;+\s*$"#;

pub(super) fn spec() -> FormatSpec {
    FormatSpec {
        extension: "js",
        import_pattern: Regex::new(IMPORT_PATTERN).expect("js import pattern is valid"),
        link_pattern: None,
        link_ignore: &[],
        comment_open: "// ",
        comment_close: "",
        strip_comments: Some(remove_comments),
    }
}

/// Drop every line whose first non-blank characters are `//`.
///
/// Block comments and `//` after code or inside strings are left alone.
pub fn remove_comments(js: &str) -> String {
    js.split('\n')
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}
