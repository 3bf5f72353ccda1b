//! Tests for argument handling and error reporting.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "keyway");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "power-shell"] {
        t.cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("keyway"));
    }
}

#[test]
fn test_invalid_repo_flag() {
    let t = Test::with_env_file("A=1\n");

    let output = t
        .cmd()
        .env("KEYWAY_TOKEN", TOKEN)
        .args(["--repo", "not-a-repo", "push", "--yes"])
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid repository");
}

#[test]
fn test_invalid_environment_name() {
    let t = Test::with_env_file("A=1\n");

    let output = t.push(&["-e", "../prod", "--yes"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid environment name");
}

#[test]
fn test_repo_detection_outside_git_repository() {
    let t = Test::with_env_file("A=1\n");

    let output = t
        .cmd()
        .env("KEYWAY_TOKEN", TOKEN)
        .args(["push", "--yes"])
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "--repo");
}

#[test]
fn test_plan_limit_shows_upgrade_link() {
    let mut t = Test::with_env_file("A=1\n");
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(404)
        .with_body("{}")
        .create();
    let _mock = t
        .server
        .mock("POST", VAULT_PATH)
        .with_status(403)
        .with_body(
            r#"{"message":"free plan allows one environment","upgradeUrl":"https://keyway.sh/upgrade"}"#,
        )
        .create();

    let output = t.push(&["--yes"]);

    assert_failure(&output);
    assert_stderr_contains(&output, "free plan allows one environment");
    assert_stderr_contains(&output, "upgrade: https://keyway.sh/upgrade");
}

#[test]
fn test_server_error_is_reported() {
    let mut t = Test::new();
    let _mock = t
        .server
        .mock("GET", VAULT_PATH)
        .with_status(500)
        .with_body("oops")
        .create();

    let output = t.pull(&[]);

    assert_failure(&output);
    assert_stderr_contains(&output, "server error (500)");
}

#[test]
fn test_invalid_settings_file() {
    let t = Test::new();
    std::fs::write(t.config.path().join("config.toml"), "api_url = [").unwrap();

    let output = t.cmd().arg("whoami").output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid config.toml");
}
