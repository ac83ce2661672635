mod support;

use std::fs;

use tempfile::TempDir;

use support::write_file;

use zeta_core::error::LinkerError;
use zeta_core::linker::{Linker, LinkerOptions};

#[test]
fn missing_import_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    write_file(
        &temp.path().join("a.css"),
        "@import url(missing.css);\n@import url(b.css);\n.a{}",
    );
    write_file(&temp.path().join("b.css"), ".b{}");

    let report = Linker::new(temp.path().join("a.css"), LinkerOptions::default())
        .unwrap()
        .link()
        .expect("missing child must not abort the job");
    let out = fs::read_to_string(&report.output).unwrap();

    assert!(out.contains(".b{}"));
    assert!(out.contains(".a{}"));
    assert!(!out.contains("missing.css"));
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("'missing.css' does not exist"));
}

#[test]
fn unsupported_extension_fails_before_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("notes.txt");
    write_file(&root, "@import url(b.css);");

    let err = Linker::new(&root, LinkerOptions::default()).unwrap_err();

    assert!(matches!(err, LinkerError::UnsupportedFormat { .. }));
    assert!(!temp.path().join("_notes.txt").exists());
}

#[test]
fn missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let err = Linker::new(temp.path().join("a.css"), LinkerOptions::default())
        .unwrap()
        .link()
        .unwrap_err();

    assert!(matches!(err, LinkerError::Read { parent: None, .. }));
    assert!(err.to_string().contains("a.css"));
    assert!(!temp.path().join("_a.css").exists());
}

#[test]
fn unreadable_child_names_its_parent() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("a.css"), "@import url(dir.css);");
    // A directory cannot be read as a file; that is not a missing target.
    fs::create_dir(temp.path().join("dir.css")).unwrap();

    let err = Linker::new(temp.path().join("a.css"), LinkerOptions::default())
        .unwrap()
        .link()
        .unwrap_err();

    assert!(err.to_string().starts_with("a.css: "), "{err}");
}

#[test]
fn import_escaping_filesystem_root_is_skipped() {
    let temp = TempDir::new().unwrap();
    let depth = temp.path().components().count();
    let escape = "../".repeat(depth + 1);
    write_file(
        &temp.path().join("a.css"),
        &format!("@import url({escape}x.css);\n.a{{}}"),
    );

    let report = Linker::new(temp.path().join("a.css"), LinkerOptions::default())
        .unwrap()
        .link()
        .unwrap();

    assert_eq!(report.entries, 1);
    assert!(report.warnings[0].contains("cannot resolve import"));
}

#[test]
fn failed_remote_fetch_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    // Nothing listens on port 1 and no `x.css` is cached beside the root.
    write_file(
        &temp.path().join("a.css"),
        "@import url(http://127.0.0.1:1/x.css);\n.a{}",
    );

    let report = Linker::new(temp.path().join("a.css"), LinkerOptions::default())
        .unwrap()
        .link()
        .expect("failed fetch must not abort the job");
    let out = fs::read_to_string(&report.output).unwrap();

    assert_eq!(report.entries, 1);
    assert!(out.contains(".a{}"));
    assert_eq!(report.warnings.len(), 1);
    let warning = &report.warnings[0];
    assert!(
        warning.contains("cannot fetch import 'http://127.0.0.1:1/x.css'"),
        "{warning}"
    );
    assert!(!warning.contains("does not exist"), "{warning}");
    assert!(!temp.path().join("x.css").exists());
}
