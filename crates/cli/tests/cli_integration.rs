//! CLI integration tests.
//!
//! Uses `assert_cmd` to spawn the `cairn` binary and verify exit codes,
//! stdout content, and stderr content, with programs fed both from
//! temporary files and over stdin.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: create a Command for the `cairn` binary.
fn cairn() -> Command {
    cargo_bin_cmd!("cairn")
}

/// Helper: write a program into a temp dir and return its path.
fn program_file(dir: &TempDir, src: &str) -> PathBuf {
    let path = dir.path().join("program.cairn");
    fs::write(&path, src).expect("write program file");
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    cairn()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stack language interpreter"));
}

#[test]
fn version_exits_0() {
    cairn()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cairn"));
}

// ──────────────────────────────────────────────
// 2. Programs from a file
// ──────────────────────────────────────────────

#[test]
fn dump_example_prints_top_first() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(1)\npush int8(2)\npush int8(3)\ndump\nexit\n");
    cairn()
        .arg(&path)
        .assert()
        .success()
        .stdout("3\n2\n1\n")
        .stderr("");
}

#[test]
fn arithmetic_overflow_faults_with_empty_stdout() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(127)\npush int8(1)\nadd\nexit\n");
    cairn()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("overflow"));
}

#[test]
fn false_assert_faults_with_empty_stdout() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(1)\nassert int8(2)\nexit\n");
    cairn()
        .arg(&path)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("assert"));
}

#[test]
fn missing_exit_is_reported_not_a_crash() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(1)\n");
    cairn()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no exit instruction at the end of the program",
        ));
}

#[test]
fn runtime_faults_use_the_diagnostic_format() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(1)\npush int8(0)\ndiv\nexit\n");
    cairn()
        .arg(&path)
        .assert()
        .failure()
        .stderr("Error line 3: division or modulo by 0\n");
}

// ──────────────────────────────────────────────
// 3. Static diagnostics
// ──────────────────────────────────────────────

#[test]
fn static_errors_print_ascending_and_gate_execution() {
    let dir = TempDir::new().expect("temp dir");
    // Defects on lines 1 and 3; the dump on line 4 must never run.
    let path = program_file(
        &dir,
        "pusj\npush int8(2)\npush int8(300)\ndump\nexit\n",
    );
    cairn()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(
            "Error line 1: unknown instruction --> pusj\n\
             Error line 3: overflow --> 300 is not int8 type\n",
        );
}

#[test]
fn every_static_defect_surfaces_in_one_run() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(
        &dir,
        "push int8(1\nassert int9(1)\npop int8(1)\nexit\n",
    );
    cairn()
        .arg(&path)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("missing parenthesis")
                .and(predicate::str::contains("unknown type"))
                .and(predicate::str::contains("no value expected")),
        );
}

#[test]
fn json_output_carries_structured_diagnostics() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "pusj\nexit\n");
    cairn()
        .args([path.to_str().expect("utf8 path"), "--output", "json"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("\"kind\":\"UnknownInstruction\"")
                .and(predicate::str::contains("\"line\":1"))
                .and(predicate::str::contains(
                    "\"message\":\"Error line 1: unknown instruction --> pusj\"",
                )),
        );
}

// ──────────────────────────────────────────────
// 4. Programs over stdin
// ──────────────────────────────────────────────

#[test]
fn stdin_program_runs_to_exit() {
    cairn()
        .write_stdin("push int8(42)\ndump\nexit\n")
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn stdin_scanning_stops_at_the_terminator() {
    // The junk after `;;` would be an unknown instruction if scanned.
    cairn()
        .write_stdin("push int8(7)\ndump\nexit\n;;\nnot an instruction\n")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn file_input_reads_past_a_terminator_line() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(7)\n;;\ndump\nexit\n");
    cairn().arg(&path).assert().success().stdout("7\n");
}

// ──────────────────────────────────────────────
// 5. Misc surfaces
// ──────────────────────────────────────────────

#[test]
fn unreadable_file_exits_1() {
    cairn()
        .arg("no_such_program.cairn")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn debug_dumps_both_streams_and_still_runs() {
    let dir = TempDir::new().expect("temp dir");
    let path = program_file(&dir, "push int8(1)\ndump\nexit\n");
    cairn()
        .args([path.to_str().expect("utf8 path"), "--debug"])
        .assert()
        .success()
        .stdout("1\n")
        .stderr(
            predicate::str::contains("scanned tokens")
                .and(predicate::str::contains("instructions")),
        );
}
