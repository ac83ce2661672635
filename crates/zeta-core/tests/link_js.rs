mod support;

use std::fs;

use tempfile::TempDir;

use support::write_file;

use zeta_core::linker::{Linker, LinkerOptions};

#[test]
fn repeated_require_emits_content_once() {
    let temp = TempDir::new().unwrap();
    write_file(
        &temp.path().join("a.js"),
        "require('./b.js');\nrequire('./b.js');\nmain();\n",
    );
    write_file(&temp.path().join("b.js"), "function helper() {}\n");

    let report = Linker::new(temp.path().join("a.js"), LinkerOptions::default())
        .unwrap()
        .link()
        .unwrap();
    let out = fs::read_to_string(&report.output).unwrap();

    assert_eq!(out.matches("function helper() {}").count(), 1);
    assert!(!out.contains("require("));
    assert_eq!(report.entries, 2);
    assert!(report.warnings.is_empty());
}

#[test]
fn mutual_requires_terminate() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("a.js"), "require('b.js');\nvar a = 1;");
    write_file(&temp.path().join("b.js"), "require('c.js');\nvar b = 2;");
    write_file(&temp.path().join("c.js"), "require('a.js');\nvar c = 3;");

    let report = Linker::new(temp.path().join("a.js"), LinkerOptions::default())
        .unwrap()
        .link()
        .unwrap();
    let out = fs::read_to_string(&report.output).unwrap();

    assert!(out.find("var c").unwrap() < out.find("var b").unwrap());
    assert!(out.find("var b").unwrap() < out.find("var a").unwrap());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("a.js -> b.js -> c.js -> a.js"));
}

#[test]
fn strip_comments_removes_full_line_comments_only() {
    let temp = TempDir::new().unwrap();
    write_file(
        &temp.path().join("app.js"),
        "// entry point\nrequire('lib/util.js');\n  // indented note\nstart(); // trailing stays\n",
    );
    write_file(&temp.path().join("lib/util.js"), "// util\nfunction util() {}\n");

    let options = LinkerOptions::default().with_strip_comments(true);
    let report = Linker::new(temp.path().join("app.js"), options).unwrap().link().unwrap();
    let out = fs::read_to_string(&report.output).unwrap();

    assert!(!out.contains("entry point"));
    assert!(!out.contains("indented note"));
    assert!(!out.contains("// util\n"));
    assert!(out.contains("start(); // trailing stays"));
    assert!(out.contains("// imported: 'lib/util.js'\n"));
    assert!(out.contains("// imported from: 'app.js'\n"));
}
