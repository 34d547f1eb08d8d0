//! Integration tests for the `highlights` subcommand.

mod common;

use common::{cmd, hello_pdf, write};
use predicates::prelude::*;

#[test]
fn text_output_lists_highlights_by_page() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("papers/smith2020.pdf"), &hello_pdf(3, &[1, 3]));

    cmd()
        .args(["highlights", "smith2020", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("page\tcolor\tauthor\tdate\ttext"))
        .stdout(predicate::str::contains(
            "1\trgba(255, 0, 0, 0.5)\tAlice\tD:20240301120000Z\tHello",
        ))
        .stdout(predicate::str::contains("3\trgba(255, 0, 0, 0.5)"))
        .stdout(predicate::str::contains("\n2\t").not());
}

#[test]
fn json_output_has_record_shape() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("smith2020.pdf"), &hello_pdf(3, &[1, 3]));

    let output = cmd()
        .args(["highlights", "smith2020", "--format", "json", "--root"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["page"], 1);
    assert_eq!(records[1]["page"], 3);
    assert_eq!(records[0]["highlight"]["text"], "Hello");
    assert_eq!(records[0]["highlight"]["colorRgba"], "rgba(255, 0, 0, 0.5)");
    assert_eq!(records[0]["author"], "Alice");
    assert_eq!(records[0]["modificationDate"], "D:20240301120000Z");
}

#[test]
fn root_can_come_from_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("smith2020.pdf"), &hello_pdf(1, &[1]));

    cmd()
        .env("PDFHIGHLIGHTS_ROOT", dir.path())
        .args(["highlights", "smith2020", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page,color,author,date,text"))
        .stdout(predicate::str::contains(
            "1,\"rgba(255, 0, 0, 0.5)\",Alice,D:20240301120000Z,Hello",
        ));
}

#[test]
fn unknown_basename_prints_notice_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("smith2020.pdf"), &hello_pdf(1, &[1]));

    cmd()
        .args(["highlights", "missing", "--format", "json", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"))
        .stderr(predicate::str::contains("Could not find PDF 'missing'."));
}

#[test]
fn broken_pdf_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("broken.pdf"), b"this is not a pdf");

    cmd()
        .args(["highlights", "broken", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn missing_root_argument_is_a_usage_error() {
    cmd()
        .args(["highlights", "smith2020"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--root"));
}
