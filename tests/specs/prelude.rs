//! Shared harness for kvr behavioral specs
//!
//! Each spec gets a `Project`: a temp directory with a `kvr.toml` whose
//! store and binlog live inside it. Commands run with that directory as
//! the working directory.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::Predicate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SMALL_BINLOG_CONFIG: &str = r#"
[binlog]
dir = "binlog"
max_file_size = 64
max_file_count = 100
sync_on_append = false

[store]
path = "data/store.json"
"#;

pub struct Project {
    dir: TempDir,
}

impl Project {
    /// A project with default settings and no config file
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// A project with `kvr.toml` written from `config`
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.file("kvr.toml", config);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        std::fs::read(self.dir.path().join(rel)).unwrap()
    }

    /// Run `kvr` in this project, passing `--config kvr.toml` when present
    pub fn kvr(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("kvr").unwrap();
        cmd.current_dir(self.dir.path());
        cmd.env("RUST_LOG", "warn");
        if self.dir.path().join("kvr.toml").exists() {
            cmd.arg("--config").arg("kvr.toml");
        }
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.cmd.write_stdin(input.into());
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            run.output.status,
            run.stderr()
        );
        run
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout: {}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_bytes(&self) -> &[u8] {
        &self.output.stdout
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicates::str::contains(needle).eval(stdout.as_str()),
            "stdout lacks {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            predicates::str::contains(needle).eval(stderr.as_str()),
            "stderr lacks {needle:?}:\n{stderr}"
        );
        self
    }
}
