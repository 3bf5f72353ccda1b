//! Test support utilities for keyway integration tests.
//!
//! Every test gets its own project dir, its own config dir, and its own mock
//! API server, so tests can run in parallel.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;

use mockito::{Server, ServerGuard};
use tempfile::TempDir;

/// Isolated test environment.
pub struct Test {
    /// Project directory the command runs in
    pub dir: TempDir,
    /// Value of `KEYWAY_CONFIG_DIR`
    pub config: TempDir,
    /// Mock Keyway API
    pub server: ServerGuard,
}

impl Test {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
            config: TempDir::new().expect("failed to create config dir"),
            server: Server::new(),
        }
    }

    /// Create a test environment with a `.env` file.
    pub fn with_env_file(content: &str) -> Self {
        let t = Self::new();
        t.write_env(content);
        t
    }

    pub fn write_env(&self, content: &str) {
        fs::write(self.dir.path().join(".env"), content).expect("failed to write .env");
    }

    pub fn read_env(&self) -> String {
        fs::read_to_string(self.dir.path().join(".env")).expect("failed to read .env")
    }

    pub fn env_exists(&self) -> bool {
        self.dir.path().join(".env").exists()
    }
}
