//! Directory materialization: walk a source tree, substitute variables, and
//! write a profile-specific output tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::backup::BackupSet;
use crate::error::AppError;
use crate::profile::{Profile, VariableTable};
use crate::template;

/// Filename suffix marking a file that requires substitution before it is a
/// final artifact. Stripping it is the only rename materialization performs.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// One matched source file scheduled for materialization.
#[derive(Debug, Clone)]
pub struct FileTask {
    /// Absolute path of the source file.
    pub source: PathBuf,
    /// Path relative to the walked source root.
    pub relative: PathBuf,
}

impl FileTask {
    fn new(source_dir: &Path, path: &Path) -> Result<Self, AppError> {
        let relative = path.strip_prefix(source_dir).map_err(|_| {
            AppError::config_error(format!(
                "Walked entry {} escapes source root {}",
                path.display(),
                source_dir.display()
            ))
        })?;
        Ok(Self { source: path.to_path_buf(), relative: relative.to_path_buf() })
    }
}

/// Aggregate outcome of one directory materialization call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessResult {
    /// Files substituted and written under the target tree.
    pub processed: usize,
    /// Files rejected by the glob pattern.
    pub skipped: usize,
}

/// Per-profile template processor.
///
/// Resolves the profile's variable table once at construction and applies it
/// to every file routed through it. Strict mode and a backup set are opt-in.
#[derive(Debug)]
pub struct TemplateProcessor {
    profile: Profile,
    variables: VariableTable,
    strict: bool,
    backup: Option<BackupSet>,
}

impl TemplateProcessor {
    /// Create a permissive processor for a profile.
    pub fn new(profile: Profile) -> Self {
        Self { profile, variables: profile.variables(), strict: false, backup: None }
    }

    /// Fail on placeholders that survive substitution.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Preserve pre-existing target files into `backup` before overwriting them.
    pub fn with_backup(mut self, backup: BackupSet) -> Self {
        self.backup = Some(backup);
        self
    }

    /// The profile this processor resolves variables for.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Number of files preserved by the backup set so far.
    pub fn backed_up(&self) -> usize {
        self.backup.as_ref().map_or(0, BackupSet::count)
    }

    /// Substitute this profile's variables in a single document.
    pub fn process_template(&self, content: &str) -> String {
        template::substitute(content, &self.variables)
    }

    /// Materialize every file under `source_dir` whose basename matches
    /// `pattern` into the mirrored location under `target_dir`.
    ///
    /// The walk is deterministic (lexicographic by file name). The first
    /// read or write failure aborts the call; files written before the
    /// failure remain on disk.
    pub fn process_template_directory(
        &mut self,
        source_dir: &Path,
        target_dir: &Path,
        pattern: &str,
    ) -> Result<ProcessResult, AppError> {
        if !source_dir.is_dir() {
            return Err(AppError::SourceNotFound(source_dir.to_path_buf()));
        }
        let pattern = Pattern::new(pattern).map_err(|err| {
            AppError::config_error(format!("Invalid glob pattern '{pattern}': {err}"))
        })?;

        let mut result = ProcessResult::default();
        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !pattern.matches(&entry.file_name().to_string_lossy()) {
                result.skipped += 1;
                continue;
            }

            let task = FileTask::new(source_dir, entry.path())?;
            let content = fs::read_to_string(&task.source)?;
            self.process_file_content(&content, &task.relative, target_dir)?;
            result.processed += 1;
        }

        Ok(result)
    }

    /// Substitute and write one file's content under `target_dir`.
    ///
    /// Shared by the filesystem walk above and the embedded-asset install
    /// path. Returns the path written.
    pub fn process_file_content(
        &mut self,
        content: &str,
        relative: &Path,
        target_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let rendered = self.render_checked(content, relative)?;
        let target_path = target_dir.join(target_relative_path(relative));

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Some(backup) = self.backup.as_mut() {
            backup.preserve(&target_path, &rendered)?;
        }
        fs::write(&target_path, rendered)?;

        Ok(target_path)
    }

    fn render_checked(&self, content: &str, relative: &Path) -> Result<String, AppError> {
        let rendered = template::substitute(content, &self.variables);
        if self.strict
            && let Some(name) = template::unresolved_placeholders(&rendered).into_iter().next()
        {
            return Err(AppError::UnresolvedPlaceholder {
                file: relative.display().to_string(),
                name,
            });
        }
        Ok(rendered)
    }
}

/// Derive the target-relative path for a source-relative path.
///
/// A trailing `.template` on the basename is stripped; everything else is
/// preserved verbatim. A file named exactly `.template` keeps its name.
pub fn target_relative_path(relative: &Path) -> PathBuf {
    let stripped = relative
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
        .filter(|name| !name.is_empty());

    match stripped {
        Some(name) => relative.with_file_name(name),
        None => relative.to_path_buf(),
    }
}
