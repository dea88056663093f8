//! Common test utilities for harvest CLI tests.
//!
//! `TestEnv` is an isolated project directory plus an isolated home, with a
//! helper to run the `harvest` binary inside it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a harvest CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Stdout split into NDJSON values.
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("create project dir"),
            home_dir: tempfile::tempdir().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_harvest")),
        }
    }

    /// Two levels with a small block tree:
    ///
    /// - `button` needs `i-bem` before it for js and links its `icon` elem
    /// - `desktop.blocks` redefines `button.css`
    pub fn with_blocks() -> Self {
        let env = Self::new();
        env.write("common.blocks/i-bem/i-bem.js", "/* i-bem */\n");
        env.write("common.blocks/button/button.js", "/* button */\n");
        env.write("common.blocks/button/button.css", ".button {}\n");
        env.write(
            "common.blocks/button/button.deps.json",
            r#"[
  {"tech": "js", "mustDeps": "i-bem"},
  {"shouldDeps": {"elems": ["icon"]}}
]"#,
        );
        env.write("common.blocks/button/__icon/button__icon.css", ".button__icon {}\n");
        env.write("desktop.blocks/button/button.css", ".button { cursor: pointer }\n");
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, content).expect("write fixture");
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from(self.project_root.path(), args, env_vars)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("HARVEST_LEVELS")
            .env_remove("HARVEST_READ_CONCURRENCY")
            .env_remove("HARVEST_WALK_TIMEOUT_MS")
            .env_remove("HARVEST_VERBOSITY");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute harvest");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
