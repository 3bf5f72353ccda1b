//! Command helper methods for Test.

use super::fixtures::{REPO, TOKEN};
use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a keyway command pointed at the mock server.
    ///
    /// The command runs non-interactively (`CI=1`) with colors off and no
    /// token in the environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keyway").expect("failed to find keyway binary");
        cmd.env("KEYWAY_CONFIG_DIR", self.config.path());
        cmd.env("KEYWAY_API_URL", self.server.url());
        cmd.env("CI", "1");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("KEYWAY_TOKEN");
        cmd.env_remove("KEYWAY_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Like [`Test::cmd`], with `KEYWAY_TOKEN` and `--repo` set.
    pub fn authed(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("KEYWAY_TOKEN", TOKEN);
        cmd.args(["--repo", REPO]);
        cmd
    }

    /// Run an authenticated command.
    pub fn run(&self, args: &[&str]) -> Output {
        self.authed()
            .args(args)
            .output()
            .expect("failed to run keyway")
    }

    pub fn push(&self, extra: &[&str]) -> Output {
        let mut args = vec!["push"];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    pub fn pull(&self, extra: &[&str]) -> Output {
        let mut args = vec!["pull"];
        args.extend_from_slice(extra);
        self.run(&args)
    }
}
