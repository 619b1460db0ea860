use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn minic() -> Command {
    Command::cargo_bin("minic").unwrap()
}

#[test]
fn runs_a_program_and_prints_its_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prog.mc");
    fs::write(&path, "int main() { int a = 2 + 3 * 4; print(a); return 0; }").unwrap();

    minic().arg(&path).assert().success().stdout(predicate::str::contains("14"));
}

#[test]
fn no_file_argument_prints_a_message_and_exits_successfully() {
    minic().assert().success().stdout(predicate::str::contains("No input file specified."));
}

#[test]
fn a_semantic_error_exits_non_zero_with_a_readable_message() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.mc");
    fs::write(&path, "int main() { x = 3; return 0; }").unwrap();

    minic()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Compilation/Runtime error"));
}

#[test]
fn tokens_flag_suppresses_interpretation_and_prints_the_token_stream() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prog.mc");
    fs::write(&path, "int main() { print(1); return 0; }").unwrap();

    minic()
        .arg(&path)
        .arg("--tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tokens:"))
        .stdout(predicate::str::contains("Print").or(predicate::str::contains("print")));
}

#[test]
fn codegen_writes_assembly_next_to_the_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prog.mc");
    fs::write(&path, "int main() { return 0; }").unwrap();

    minic()
        .arg(&path)
        .arg("--codegen")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Assembly:"));

    let out_path = dir.path().join("prog.out");
    assert!(out_path.exists());
    assert!(fs::read_to_string(out_path).unwrap().contains("RET"));
}
