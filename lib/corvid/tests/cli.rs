//! Integration tests for the `corvid` command-line pretty-printer
//! (spec.md §6): exercises the actual built binary the way a user would,
//! rather than calling into the library directly.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::Builder;

fn corvid() -> Command {
    Command::cargo_bin("corvid").expect("the corvid binary is built by this workspace")
}

fn temp_file(extension: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("tempfile creation should not fail");
    file.write_all(contents.as_bytes())
        .expect("writing to a fresh tempfile should not fail");
    file
}

#[test]
fn pretty_prints_turtle_with_shared_subject() {
    let input = temp_file(
        "ttl",
        "<http://example.com/s> <http://example.com/p1> <http://example.com/o1> .\n\
         <http://example.com/s> <http://example.com/p2> <http://example.com/o2> .\n",
    );
    corvid()
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<http://example.com/s>"))
        .stdout(predicate::str::contains("<http://example.com/p1>"))
        .stdout(predicate::str::contains(" ;"));
}

#[test]
fn round_trips_a_collection() {
    let input = temp_file(
        "ttl",
        "<http://example.com/s> <http://example.com/p> ( <http://example.com/a> <http://example.com/b> ) .\n",
    );
    corvid()
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("("))
        .stdout(predicate::str::contains(")"))
        .stdout(predicate::str::contains("<http://example.com/a>"))
        .stdout(predicate::str::contains("<http://example.com/b>"));
}

#[test]
fn ntriples_round_trips_an_n_triples_document() {
    let input = temp_file(
        "nt",
        "<http://example.com/s> <http://example.com/p> \"hello\" .\n",
    );
    corvid()
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<http://example.com/s>"))
        .stdout(predicate::str::contains("\"hello\""));
}

#[test]
fn unrecognized_extension_fails_with_exit_code_1() {
    let input = temp_file("unknownformat", "");
    corvid()
        .arg(input.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unrecognized syntax extension"));
}

#[test]
fn missing_file_fails_with_exit_code_1() {
    corvid()
        .arg("/no/such/directory/missing.ttl")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn strict_mode_aborts_on_first_syntax_error() {
    let input = temp_file(
        "ttl",
        "<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n\
         this is not valid turtle\n",
    );
    corvid().arg(input.path()).assert().failure().code(1);
}

#[test]
fn lax_mode_skips_the_bad_statement_and_keeps_the_good_one() {
    let input = temp_file(
        "nt",
        "<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n\
         this is not valid n-triples\n\
         <http://example.com/s2> <http://example.com/p2> <http://example.com/o2> .\n",
    );
    corvid()
        .arg(input.path())
        .arg("--lax")
        .assert()
        .success()
        .stdout(predicate::str::contains("<http://example.com/s>"))
        .stdout(predicate::str::contains("<http://example.com/s2>"));
}

#[test]
fn ascii_flag_escapes_non_ascii_literals() {
    let input = temp_file(
        "nt",
        "<http://example.com/s> <http://example.com/p> \"caf\u{e9}\" .\n",
    );
    corvid()
        .arg(input.path())
        .arg("--ascii")
        .assert()
        .success()
        .stdout(predicate::str::contains("\\u00E9"))
        .stdout(predicate::str::contains("caf\u{e9}").not());
}
