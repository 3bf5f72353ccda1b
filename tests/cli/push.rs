//! Tests for `keyway push`.

use mockito::Matcher;
use serde_json::json;

use crate::support::*;

#[test]
fn test_push_creates_missing_environment() {
    let mut t = Test::with_env_file("B=2\nA=1\n");
    let read = t
        .server
        .mock("GET", VAULT_PATH)
        .match_header("authorization", bearer().as_str())
        .with_status(404)
        .with_body(r#"{"error":"vault not found"}"#)
        .create();
    let write = t
        .server
        .mock("POST", VAULT_PATH)
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::Json(json!({ "content": "A=1\nB=2\n" })))
        .with_status(200)
        .with_body("{}")
        .create();

    let output = t.push(&["--yes"]);

    assert_success(&output);
    assert_stdout_contains(&output, "pushed 2 secrets");
    read.assert();
    write.assert();
}

#[test]
fn test_push_keeps_vault_only_secrets() {
    let mut t = Test::with_env_file("A=new\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=old\nREMOTE=r\n"))
        .create();
    let write = t
        .server
        .mock("POST", VAULT_PATH)
        .match_body(Matcher::Json(json!({ "content": "A=new\nREMOTE=r\n" })))
        .with_status(200)
        .with_body("{}")
        .create();

    let output = t.push(&["--yes"]);

    assert_success(&output);
    assert_stdout_contains(&output, "--prune");
    assert_stdout_contains(&output, "REMOTE");
    write.assert();
}

#[test]
fn test_push_prune_deletes_vault_only_secrets() {
    let mut t = Test::with_env_file("A=new\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=old\nREMOTE=r\n"))
        .create();
    let write = t
        .server
        .mock("POST", VAULT_PATH)
        .match_body(Matcher::Json(json!({ "content": "A=new\n" })))
        .with_status(200)
        .with_body("{}")
        .create();

    let output = t.push(&["--prune", "--yes"]);

    assert_success(&output);
    assert_stdout_contains(&output, "will be deleted");
    write.assert();
}

#[test]
fn test_push_up_to_date_sends_nothing() {
    let mut t = Test::with_env_file("A=1\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();
    let write = t.server.mock("POST", VAULT_PATH).expect(0).create();

    let output = t.push(&[]);

    assert_success(&output);
    assert_stdout_contains(&output, "up to date");
    write.assert();
}

#[test]
fn test_push_without_yes_needs_confirmation() {
    let mut t = Test::with_env_file("A=1\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(200)
        .with_body(content_body(""))
        .create();
    let write = t.server.mock("POST", VAULT_PATH).expect(0).create();

    let output = t.push(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "requires confirmation");
    assert_stderr_contains(&output, "pass --yes");
    write.assert();
}

#[test]
fn test_push_empty_file_fails() {
    let t = Test::with_env_file("# nothing here\n\n");

    let output = t.push(&["--yes"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets found");
}

#[test]
fn test_push_missing_file_suggests_pull() {
    let t = Test::new();

    let output = t.push(&["--yes"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "env file not found");
    assert_stderr_contains(&output, "keyway pull");
}

#[test]
fn test_push_custom_file_and_environment() {
    let mut t = Test::new();
    std::fs::write(t.dir.path().join(".env.production"), "PROD=1\n").unwrap();
    let _mock = t
        .server
        .mock("GET", "/v1/vaults/acme/widgets/production")
        .with_status(404)
        .with_body("{}")
        .create();
    let write = t
        .server
        .mock("POST", "/v1/vaults/acme/widgets/production")
        .match_body(Matcher::Json(json!({ "content": "PROD=1\n" })))
        .with_status(200)
        .with_body("{}")
        .create();

    let output = t.push(&["-e", "production", "-f", ".env.production", "--yes"]);

    assert_success(&output);
    write.assert();
}

#[test]
fn test_push_never_prints_values() {
    let mut t = Test::with_env_file("API_KEY=very-secret-value\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(404)
        .with_body("{}")
        .create();
    let _mock = t
        .server
        .mock("POST", VAULT_PATH)
        .with_status(200)
        .with_body("{}")
        .create();

    let output = t.push(&["--yes"]);

    assert_success(&output);
    assert_stdout_contains(&output, "API_KEY");
    assert_stdout_excludes(&output, "very-secret-value");
}

#[test]
fn test_push_warns_about_repeated_keys() {
    let mut t = Test::with_env_file("A=first\nB=2\nA=second\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(404)
        .with_body("{}")
        .create();
    let write = t
        .server
        .mock("POST", VAULT_PATH)
        .match_body(Matcher::Json(json!({ "content": "A=second\nB=2\n" })))
        .with_status(200)
        .with_body("{}")
        .create();

    let output = t.push(&["--yes"]);

    assert_success(&output);
    assert_stdout_contains(&output, "3 entry lines for 2 keys; later values win");
    write.assert();
}
