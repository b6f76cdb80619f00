//! End-to-end tests for the CLI binary.

#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("smt2hr").unwrap()
}

const SCRIPT: &str = "\
(set-logic QF_ABV)
(declare-fun foo_arg_1 () (Array (_ BitVec 32) (_ BitVec 8)))
(assert (let ((.def_1 (select foo_arg_1 #b0))) (let ((.def_2 (bvadd .def_1 .def_1))) .def_2)))
";

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("human-readable"));
}

#[test]
fn test_cli_translate_mode() {
    cmd()
        .write_stdin(SCRIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("foo_arg_1 + foo_arg_1"));
}

#[test]
fn test_cli_pretty_mode() {
    cmd()
        .args(["--mode", "pretty"])
        .write_stdin("(assert (foo[3_32]::(foo[2_32]::(foo[1_32]::foo[0_32]))))\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("assert :"))
        .stdout(predicate::str::contains("foo[3:0]"));
}

#[test]
fn test_cli_json_format() {
    cmd()
        .args(["--format", "json"])
        .write_stdin(SCRIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assertions\""))
        .stdout(predicate::str::contains("foo_arg_1 + foo_arg_1"));
}

#[test]
fn test_cli_json_pretty_includes_terms() {
    cmd()
        .args(["--mode", "pretty", "--format", "json"])
        .write_stdin("(assert (= a b))\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"terms\""));
}

#[test]
fn test_cli_unsupported_assertion_aborts() {
    cmd()
        .write_stdin("(assert (bvxor a b))\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bvxor"));
}

#[test]
fn test_cli_unknown_mode() {
    cmd()
        .args(["--mode", "solve"])
        .write_stdin(SCRIPT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode"));
}

#[test]
fn test_cli_missing_file() {
    cmd()
        .arg("/nonexistent/input.smt2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}
