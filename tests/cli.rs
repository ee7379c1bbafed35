//! End-to-end tests for the apidrift binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn apidrift() -> Command {
    Command::cargo_bin("apidrift").unwrap()
}

#[test]
fn diff_reports_added_function() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.py");
    let new = dir.path().join("new.py");
    fs::write(&old, "def f(a: int) -> int:\n    return a\n").unwrap();
    fs::write(
        &new,
        "def f(a: int) -> int:\n    return a\n\ndef g(name: str) -> str:\n    return name\n",
    )
    .unwrap();

    apidrift()
        .args(["diff", old.to_str().unwrap(), new.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: g"))
        .stdout(predicate::str::contains("(name: str) -> str"));
}

#[test]
fn diff_of_identical_files_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("m.py");
    fs::write(&file, "def f():\n    pass\n").unwrap();

    apidrift()
        .args(["diff", file.to_str().unwrap(), file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No API changes detected"));
}

#[test]
fn diff_json_output_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.py");
    let new = dir.path().join("new.py");
    fs::write(&old, "def f():\n    pass\n").unwrap();
    fs::write(&new, "class f:\n    pass\n").unwrap();

    let output = apidrift()
        .args([
            "-o",
            "json",
            "diff",
            old.to_str().unwrap(),
            new.to_str().unwrap(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let changes: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(changes[0]["kind"], "modified");
    assert_eq!(changes[0]["name"], "f");
}

#[test]
fn extract_lists_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("m.py");
    fs::write(
        &file,
        "class Greeter:\n    \"\"\"Greets.\"\"\"\n\ndef greet(name: str) -> str:\n    return name\n",
    )
    .unwrap();

    apidrift()
        .args(["extract", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Greeter (class)"))
        .stdout(predicate::str::contains("greet (function)"))
        .stdout(predicate::str::contains("(name: str) -> str"));
}

#[test]
fn extract_fails_on_invalid_syntax() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.py");
    fs::write(&file, "def broken(:\n").unwrap();

    apidrift()
        .args(["extract", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax"));
}
