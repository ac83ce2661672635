//! Output assembly: merging resolved entries into one artifact.

use std::path::Path;

use crate::error::LinkerError;
use crate::format::FormatSpec;
use crate::linker::ResolvedEntry;

const SEPARATOR_WIDTH: usize = 30;

/// Concatenate entries in order, each preceded by identification comments.
///
/// Entries whose text is blank are skipped entirely.
pub fn assemble(entries: &[ResolvedEntry], format: &FormatSpec) -> String {
    let mut out = String::new();
    for entry in entries.iter().filter(|entry| !entry.is_blank()) {
        let parent = match &entry.parent {
            Some(parent) => format!("'{parent}'"),
            None => "none".to_string(),
        };
        out.push_str(&format.comment(&"=".repeat(SEPARATOR_WIDTH)));
        out.push_str(&format.comment(&format!("imported: '{}'", entry.path)));
        out.push_str(&format.comment(&format!("imported from: {parent}")));
        out.push_str(entry.text.trim());
        out.push_str("\n\n\n");
    }
    out
}

pub fn write_output(path: &Path, content: &str) -> Result<(), LinkerError> {
    std::fs::write(path, content).map_err(|source| LinkerError::Write {
        path: path.to_path_buf(),
        source,
    })
}
