//! Tests for login, logout, whoami, and token handling.

use mockito::Matcher;
use serde_json::json;

use crate::support::*;

fn mock_validate(t: &mut Test, token: &str) -> mockito::Mock {
    t.server
        .mock("POST", "/v1/auth/token/validate")
        .match_body(Matcher::Json(json!({ "token": token })))
        .with_status(200)
        .with_body(r#"{"username":"octocat","expiresAt":null}"#)
        .create()
}

#[test]
fn test_login_with_token_then_whoami() {
    let mut t = Test::new();
    let validate = mock_validate(&mut t, "kw_pat");

    let output = t
        .cmd()
        .args(["login", "--token", "kw_pat"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "logged in as octocat");
    validate.assert();

    let output = t.cmd().arg("whoami").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "octocat");
    assert_stdout_contains(&output, "never");
}

#[test]
fn test_stored_token_is_encrypted_at_rest() {
    let mut t = Test::new();
    let _validate = mock_validate(&mut t, "kw_pat_plaintext");

    let output = t
        .cmd()
        .args(["login", "--token", "kw_pat_plaintext"])
        .output()
        .unwrap();
    assert_success(&output);

    let record = std::fs::read_to_string(t.config.path().join("config.json")).unwrap();
    assert!(!record.contains("kw_pat_plaintext"));
    assert!(t.config.path().join(".key").exists());
}

#[test]
fn test_stored_token_is_used_for_requests() {
    let mut t = Test::new();
    let _validate = mock_validate(&mut t, "kw_pat");
    let read = t
        .server
        .mock("GET", VAULT_PATH)
        .match_header("authorization", "Bearer kw_pat")
        .with_status(200)
        .with_body(content_body("A=1\n"))
        .create();

    assert_success(&t.cmd().args(["login", "--token", "kw_pat"]).output().unwrap());
    let output = t
        .cmd()
        .args(["--repo", REPO, "pull"])
        .output()
        .unwrap();

    assert_success(&output);
    read.assert();
}

#[test]
fn test_login_with_rejected_token() {
    let mut t = Test::new();
    let _mock = t
        .server
        .mock("POST", "/v1/auth/token/validate")
        .with_status(401)
        .with_body(r#"{"error":"invalid token"}"#)
        .create();

    let output = t
        .cmd()
        .args(["login", "--token", "kw_bad"])
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "token was rejected");
}

#[test]
fn test_logout_forgets_credential() {
    let mut t = Test::new();
    let _validate = mock_validate(&mut t, "kw_pat");
    assert_success(&t.cmd().args(["login", "--token", "kw_pat"]).output().unwrap());

    let output = t.cmd().arg("logout").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "logged out");

    let output = t.cmd().arg("whoami").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "not logged in");
}

#[test]
fn test_logout_when_not_logged_in() {
    let t = Test::new();

    let output = t.cmd().arg("logout").output().unwrap();

    assert_success(&output);
}

#[test]
fn test_whoami_not_logged_in_suggests_login() {
    let t = Test::new();

    let output = t.cmd().arg("whoami").output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "not logged in");
    assert_stderr_contains(&output, "run: keyway login");
}

#[test]
fn test_whoami_reports_environment_token() {
    let t = Test::new();

    let output = t.authed().arg("whoami").output().unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "KEYWAY_TOKEN");
}

#[test]
fn test_rejected_environment_token() {
    let mut t = Test::new();
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(401)
        .with_body("{}")
        .expect(1)
        .create();

    let output = t.pull(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "token was rejected");
    assert_stderr_contains(&output, "run: keyway login");
}

#[test]
fn test_rejected_stored_token_is_cleared_when_non_interactive() {
    let mut t = Test::new();
    let _validate = mock_validate(&mut t, "kw_stale");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(401)
        .with_body("{}")
        .create();
    assert_success(&t.cmd().args(["login", "--token", "kw_stale"]).output().unwrap());

    let output = t
        .cmd()
        .args(["--repo", REPO, "pull"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "keyway login");

    let output = t.cmd().arg("whoami").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_no_credential_non_interactive_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--repo", REPO, "pull"])
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "login required");
}
