//! Integration tests for the `file` subcommand.

mod common;

use common::{cmd, hello_pdf, write};
use predicates::prelude::*;

#[test]
fn all_pages_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write(&path, &hello_pdf(3, &[1, 2, 3]));

    let output = cmd().arg("file").arg(&path).args(["--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pages: Vec<u64> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["page"].as_u64().unwrap())
        .collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn page_range_selects_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write(&path, &hello_pdf(3, &[1, 2, 3]));

    let output = cmd()
        .arg("file")
        .arg(&path)
        .args(["--pages", "2-3", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["page"], 2);
}

#[test]
fn page_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write(&path, &hello_pdf(2, &[1]));

    cmd()
        .arg("file")
        .arg(&path)
        .args(["--pages", "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds document page count"));
}

#[test]
fn nonexistent_file_fails() {
    cmd()
        .args(["file", "/nonexistent/doc.pdf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn text_output_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write(&path, &hello_pdf(1, &[1]));

    cmd()
        .arg("file")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("page\tcolor\tauthor\tdate\ttext\n"))
        .stdout(predicate::str::contains("\tHello\n"));
}
