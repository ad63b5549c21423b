//! Preservation of pre-existing target files before an install overwrites them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Bookkeeping directory the installer keeps under the install root.
pub const STATE_DIR: &str = ".niopd";

/// One timestamped set of files preserved during a single install run.
///
/// The set's directory is created lazily on the first preservation, so runs
/// that overwrite nothing leave no empty backup directories behind.
#[derive(Debug)]
pub struct BackupSet {
    install_root: PathBuf,
    dir: PathBuf,
    preserved: Vec<PathBuf>,
}

impl BackupSet {
    /// Create a backup set for an install rooted at `install_dir`.
    pub fn new(install_dir: &Path) -> Self {
        let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
        Self {
            install_root: install_dir.to_path_buf(),
            dir: install_dir.join(STATE_DIR).join("backups").join(stamp),
            preserved: Vec::new(),
        }
    }

    /// Preserve `target` into this set if it exists with content differing
    /// from `incoming`.
    ///
    /// Files already byte-identical to what is about to be written are left
    /// alone; an idempotent re-run therefore produces no backup churn.
    /// Returns whether a copy was made.
    pub fn preserve(&mut self, target: &Path, incoming: &str) -> Result<bool, AppError> {
        if !target.is_file() {
            return Ok(false);
        }
        let existing = fs::read_to_string(target)?;
        if hash_content(&existing) == hash_content(incoming) {
            return Ok(false);
        }

        let key = self.backup_key(target);
        let backup_path = self.dir.join(&key);
        if let Some(parent) = backup_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(target, &backup_path)?;
        self.preserved.push(key);
        Ok(true)
    }

    /// Number of files preserved so far.
    pub fn count(&self) -> usize {
        self.preserved.len()
    }

    /// Directory this set copies into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Install-root-relative paths of the preserved files, in preservation order.
    pub fn preserved(&self) -> &[PathBuf] {
        &self.preserved
    }

    fn backup_key(&self, target: &Path) -> PathBuf {
        match target.strip_prefix(&self.install_root) {
            Ok(relative) => relative.to_path_buf(),
            // Target outside the install root: fall back to its basename.
            Err(_) => PathBuf::from(target.file_name().unwrap_or(target.as_os_str())),
        }
    }
}

/// Compute a SHA-256 hash of content for comparison.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
