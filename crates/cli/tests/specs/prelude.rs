//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A run that finished successfully with one output
pub const SUCCESS_RECORD: &str = r#"{
  "workflowId": "wf-7",
  "outputs": ["a.txt"],
  "state": {
    "stage": "success",
    "created_at": "2026-01-01T12:00:00Z",
    "started_at": "2026-01-01T12:00:05Z",
    "finished_at": "2026-01-01T12:01:00Z",
    "resources": {"a.txt": "/data/run-ok/files/a.txt"}
  }
}
"#;

/// A run that failed remotely
pub const ERROR_RECORD: &str = r#"{
  "workflowId": "wf-8",
  "outputs": [],
  "state": {
    "stage": "error",
    "created_at": "2026-01-01T12:00:00Z",
    "started_at": "2026-01-01T12:00:05Z",
    "stopped_at": "2026-01-01T12:00:30Z",
    "messages": ["step 2 exited 1"]
  }
}
"#;

/// A run that was created but never observed running
pub const PENDING_RECORD: &str = r#"{
  "workflowId": "wf-9",
  "outputs": ["out.txt"],
  "state": {
    "stage": "pending",
    "created_at": "2026-01-01T12:00:00Z"
  }
}
"#;

/// Isolated configuration, run directory and environment for one spec
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        project.file("config.toml", "");
        std::fs::create_dir_all(project.runs_dir()).unwrap();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn runs_dir(&self) -> PathBuf {
        self.path().join("runs")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Store a hand-written record for a run
    pub fn record(&self, run_id: &str, content: &str) {
        self.file(&format!("runs/{}/state.json", run_id), content);
        std::fs::create_dir_all(self.runs_dir().join(run_id).join("files")).unwrap();
    }

    pub fn read_record(&self, run_id: &str) -> String {
        std::fs::read_to_string(self.runs_dir().join(run_id).join("state.json")).unwrap()
    }

    /// The rr binary, pointed at this project
    ///
    /// The cluster URL refuses connections, so any remote call fails fast.
    pub fn rr(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("rr").unwrap();
        cmd.current_dir(self.path())
            .env_remove("RR_LOG")
            .env("RR_BASE_DIR", self.runs_dir())
            .env("REANA_SERVER_URL", "http://127.0.0.1:9")
            .env("REANA_ACCESS_TOKEN", "test-token")
            .arg("--config")
            .arg(self.path().join("config.toml"));
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

    pub fn env_remove(mut self, key: &str) -> Self {
        self.cmd.env_remove(key);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let result = RunAssert::from(output);
        assert!(result.success, "expected success\n{}", result.describe());
        result
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let result = RunAssert::from(output);
        assert!(!result.success, "expected failure\n{}", result.describe());
        result
    }
}

pub struct RunAssert {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl RunAssert {
    fn describe(&self) -> String {
        format!("stdout:\n{}\nstderr:\n{}", self.stdout, self.stderr)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\n{}",
            needle,
            self.describe()
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\n{}",
            needle,
            self.describe()
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
