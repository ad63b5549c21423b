//! Shared testing utilities for niopd CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated install directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the directory the CLI installs into.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `niopd` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("niopd").expect("Failed to locate niopd binary");
        cmd.current_dir(&self.work_dir);
        cmd
    }

    /// Run a full non-interactive install for the given `--ide` value.
    pub fn install(&self, ide: &str) {
        self.cli().args(["install", "--ide", ide, "--yes"]).assert().success();
    }

    /// Read a file relative to the work directory.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative))
            .unwrap_or_else(|err| panic!("failed to read {relative}: {err}"))
    }

    /// Assert that every toolkit subtree exists under the given profile root.
    pub fn assert_installed(&self, dir_name: &str) {
        for sub in ["commands/NioPD", "scripts/NioPD", "agents/NioPD", "templates"] {
            let path = self.work_dir.join(dir_name).join(sub);
            assert!(path.is_dir(), "{} should exist", path.display());
        }
    }

    /// Count regular files under a work-directory-relative root.
    pub fn file_count(&self, relative: &str) -> usize {
        walkdir::WalkDir::new(self.work_dir.join(relative))
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .count()
    }
}
