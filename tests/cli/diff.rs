//! Tests for `keyway diff`.

use crate::support::*;

#[test]
fn test_diff_reports_each_kind_of_change() {
    let mut t = Test::with_env_file("A=1\nB=2\nSAME=x\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("B=3\nC=4\nSAME=x\n"))
        .create();

    let output = t.run(&["diff"]);

    assert_success(&output);
    assert_stdout_contains(&output, "+ A");
    assert_stdout_contains(&output, "~ B");
    assert_stdout_contains(&output, "- C");
    assert_stdout_contains(&output, "1 local only, 1 vault only, 1 changed, 1 same");
    assert_stdout_excludes(&output, "SAME");
    assert_stdout_excludes(&output, "B=");
}

#[test]
fn test_diff_in_sync() {
    let mut t = Test::with_env_file("A=1\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();

    let output = t.run(&["diff"]);

    assert_success(&output);
    assert_stdout_contains(&output, "in sync");
}

#[test]
fn test_diff_against_missing_environment() {
    let mut t = Test::with_env_file("A=1\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(404)
        .with_body("{}")
        .create();

    let output = t.run(&["diff"]);

    assert_success(&output);
    assert_stdout_contains(&output, "+ A");
}

#[test]
fn test_diff_warns_about_repeated_keys() {
    let mut t = Test::with_env_file("A=old\nA=1\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();

    let output = t.run(&["diff"]);

    assert_success(&output);
    assert_stdout_contains(&output, "2 entry lines for 1 key");
    assert_stdout_contains(&output, "in sync");
}

#[test]
fn test_diff_without_repeats_has_no_warning() {
    let mut t = Test::with_env_file("A=1\nB=2\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\nB=2\n"))
        .create();

    let output = t.run(&["diff"]);

    assert_success(&output);
    assert_stdout_excludes(&output, "entry lines");
}
