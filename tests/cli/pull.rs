//! Tests for `keyway pull`.

use crate::support::*;

#[test]
fn test_pull_into_missing_file() {
    let mut t = Test::new();
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .match_header("authorization", bearer().as_str())
        .with_status(200)
        .with_body(content_body("B=2\nA=1\n"))
        .create();

    let output = t.pull(&[]);

    assert_success(&output);
    assert_stdout_contains(&output, "pulled 2 secrets");
    assert_eq!(t.read_env(), "A=1\nB=2\n");
}

#[test]
fn test_pull_keeps_local_only_secrets() {
    let mut t = Test::with_env_file("LOCAL=keep\nA=old\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=new\nB=2\n"))
        .create();

    let output = t.pull(&[]);

    assert_success(&output);
    assert_stdout_contains(&output, "kept 1 local secret");
    assert_eq!(t.read_env(), "A=new\nB=2\nLOCAL=keep\n");
}

#[test]
fn test_pull_force_replaces_file() {
    let mut t = Test::with_env_file("LOCAL=drop\nA=old\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=new\nB=2\n"))
        .create();

    let output = t.pull(&["--force", "--yes"]);

    assert_success(&output);
    assert_eq!(t.read_env(), "A=new\nB=2\n");
}

#[test]
fn test_pull_force_without_yes_leaves_file() {
    let mut t = Test::with_env_file("LOCAL=drop\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();

    let output = t.pull(&["--force"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "pass --yes");
    assert_eq!(t.read_env(), "LOCAL=drop\n");
}

#[test]
fn test_pull_force_confirms_even_without_local_only_keys() {
    let mut t = Test::with_env_file("A=old\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=new\nB=2\n"))
        .create();

    let output = t.pull(&["--force"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "pull --force requires confirmation");
    assert_eq!(t.read_env(), "A=old\n");
}

#[test]
fn test_pull_force_into_new_file_needs_no_confirmation() {
    let mut t = Test::new();
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();

    let output = t.pull(&["--force"]);

    assert_success(&output);
    assert_eq!(t.read_env(), "A=1\n");
}

#[test]
fn test_pull_missing_environment_fails() {
    let mut t = Test::new();
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(404)
        .with_body(r#"{"error":"vault not found"}"#)
        .create();

    let output = t.pull(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "vault not found");
    assert!(!t.env_exists());
}

#[cfg(unix)]
#[test]
fn test_pull_writes_private_file() {
    use std::os::unix::fs::PermissionsExt;

    let mut t = Test::new();
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();

    let output = t.pull(&[]);

    assert_success(&output);
    let mode = std::fs::metadata(t.dir.path().join(".env"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
