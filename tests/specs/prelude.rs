//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// A few recorded tracking events, one per line
pub const SESSION: &str = r#"{"type":"view","page":"home"}
{"type":"search","query":"shoes","resultCount":10}
{"stock":14,"meta":{"type":"ec:product.view"}}
{"type":"view","page":"cart"}
{"orderId":"A-1","meta":{"type":"ec:transaction"}}
"#;

/// Scratch directory with its own config home
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn uv(&self) -> CliBuilder {
        CliBuilder::new(self)
    }
}

/// Path to the `uv` binary
///
/// The binary lives in `uv-cli`, so cargo does not export its path to this
/// package. Look in the target directory, building it once if missing.
pub fn uv_bin() -> &'static Path {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        if let Some(path) = std::env::var_os("CARGO_BIN_EXE_uv") {
            return PathBuf::from(path);
        }

        let target = std::env::var_os("CARGO_TARGET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("target"));
        let profile = if cfg!(debug_assertions) { "debug" } else { "release" };
        let bin = target
            .join(profile)
            .join(format!("uv{}", std::env::consts::EXE_SUFFIX));

        if !bin.exists() {
            let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
            let mut build = std::process::Command::new(cargo);
            build
                .current_dir(env!("CARGO_MANIFEST_DIR"))
                .args(["build", "-p", "uv-cli", "--bin", "uv"]);
            if profile == "release" {
                build.arg("--release");
            }
            let status = build.status().expect("failed to run cargo build");
            assert!(status.success(), "cargo build of uv failed");
        }
        bin
    })
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    fn new(project: &Project) -> Self {
        let mut cmd = Command::new(uv_bin());
        cmd.current_dir(project.path())
            .env("XDG_CONFIG_HOME", project.config_home())
            .env("HOME", project.path())
            .env_remove("RUST_LOG");
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn passes(mut self) -> Outcome {
        Outcome(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> Outcome {
        Outcome(self.cmd.assert().failure())
    }
}

pub struct Outcome(Assert);

impl Outcome {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(needle)))
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(needle).not()))
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        Self(self.0.stderr(predicate::str::contains(needle)))
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        Self(self.0.stderr(predicate::str::contains(needle).not()))
    }

    /// Stdout parsed as JSON Lines
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}
