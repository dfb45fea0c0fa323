//! Shared integration-test harness for running the `cfgguard` binary as a
//! child process.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helpers for spawning `cfgguard` and locating fixtures.
pub struct CfgGuardProcess;

impl CfgGuardProcess {
    /// Runs the binary with `args` to completion and returns its output.
    ///
    /// Logging environment variables are cleared so that stderr only holds
    /// what the command itself writes.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_command_with_env(args, &[])
    }

    /// Like [`spawn_command`](Self::spawn_command) with extra environment
    /// variables set on the child.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command_with_env(args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cfgguard"))
            .args(args)
            .env_remove("CFGGUARD_LOG_LEVEL")
            .env_remove("CFGGUARD_COLOR")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .output()
            .expect("failed to spawn cfgguard")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// Lossy stdout of a finished command.
#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished command.
#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
