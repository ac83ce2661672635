//! Stylesheet format.

use regex::Regex;

use super::FormatSpec;

const IMPORT_PATTERN: &str = r#"(?m)^@import +url\(\s*["']?([^)'"]+)["']?\s*\)\s*;?\s*$"#;
const LINK_PATTERN: &str = r#"url\(\s*["']?([^)'"]+)["']?\)"#;

pub(super) fn spec() -> FormatSpec {
    FormatSpec {
        extension: "css",
        import_pattern: Regex::new(IMPORT_PATTERN).expect("css import pattern is valid"),
        link_pattern: Some(Regex::new(LINK_PATTERN).expect("css link pattern is valid")),
        link_ignore: &["data:image", "http://", "https://"],
        comment_open: "/* ",
        comment_close: " */",
        strip_comments: Some(remove_comments),
    }
}

/// Remove `/* ... */` blocks.
///
/// Blocks opening with `/*!` are kept, as is the IE Mac hack (a comment
/// ending in `\*/` together with the comment that follows it). An
/// unterminated comment swallows the rest of the input.
pub fn remove_comments(css: &str) -> String {
    let mut out = css.to_string();
    let mut iemac = false;
    let mut search_from = 0;

    while let Some(offset) = out[search_from..].find("/*") {
        let start = search_from + offset;
        let preserve = out[start + 2..].starts_with('!');

        let Some(end_offset) = out[start + 2..].find("*/") else {
            if !preserve {
                out.truncate(start);
            }
            break;
        };
        let end = start + 2 + end_offset;

        if out[..end].ends_with('\\') {
            iemac = true;
            search_from = end + 2;
        } else if iemac {
            iemac = false;
            search_from = end + 2;
        } else if preserve {
            search_from = end + 2;
        } else {
            out.replace_range(start..end + 2, "");
            search_from = start;
        }
    }

    out
}
