//! Installation orchestration: which toolkit subtrees get materialized
//! where, per profile, plus the install manifest.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use glob::Pattern;
use serde::Serialize;

use crate::assets;
use crate::backup::{BackupSet, STATE_DIR};
use crate::error::AppError;
use crate::materialize::{ProcessResult, TemplateProcessor};
use crate::profile::Profile;

/// Manifest file recorded under `<install_dir>/.niopd/` after a run.
pub const MANIFEST_FILE: &str = "install.toml";

/// One (source subtree, target subtree, pattern) triple the installer
/// materializes for every profile.
#[derive(Debug, Clone, Copy)]
pub struct DirSpec {
    /// Subdirectory under the toolkit source root.
    pub source: &'static str,
    /// Subdirectory under the profile root.
    pub target: &'static str,
    /// Basename glob selecting the files to install.
    pub pattern: &'static str,
}

/// The toolkit subtrees every profile receives.
pub const INSTALL_DIRS: [DirSpec; 4] = [
    DirSpec { source: "commands/NioPD", target: "commands/NioPD", pattern: "*.md.template" },
    DirSpec { source: "scripts/NioPD", target: "scripts/NioPD", pattern: "*.sh.template" },
    DirSpec { source: "agents/NioPD", target: "agents/NioPD", pattern: "*.md" },
    DirSpec { source: "templates", target: "templates", pattern: "*.md" },
];

/// Options for one install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Profiles to install, in order.
    pub profiles: Vec<Profile>,
    /// Directory the profile roots are created under.
    pub install_dir: PathBuf,
    /// Install from a toolkit checkout instead of the embedded assets.
    pub source: Option<PathBuf>,
    /// Fail on placeholders that survive substitution.
    pub strict: bool,
    /// Preserve overwritten files into a timestamped backup set.
    pub backup: bool,
}

/// Outcome for a single profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    /// Profile this report describes.
    pub profile: Profile,
    /// Files substituted and written under the profile root.
    pub processed: usize,
    /// Source entries rejected by the directory patterns.
    pub skipped: usize,
    /// Pre-existing files preserved before overwrite.
    pub backed_up: usize,
}

/// Aggregate outcome of an install run.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    /// Directory the profile roots were created under.
    pub install_dir: PathBuf,
    /// Per-profile outcomes, in install order.
    pub profiles: Vec<ProfileReport>,
}

impl InstallReport {
    /// Total files written across all profiles.
    pub fn total_processed(&self) -> usize {
        self.profiles.iter().map(|p| p.processed).sum()
    }

    /// Total files preserved across all profiles.
    pub fn total_backed_up(&self) -> usize {
        self.profiles.iter().map(|p| p.backed_up).sum()
    }
}

/// Install every toolkit subtree for one profile.
///
/// Subtrees missing from a `--source` checkout are skipped; the embedded
/// assets always carry all four. Each profile writes only under its own
/// root directory, so installs for distinct profiles are independent.
pub fn install_profile(
    profile: Profile,
    options: &InstallOptions,
) -> Result<ProfileReport, AppError> {
    let mut processor = TemplateProcessor::new(profile).with_strict(options.strict);
    if options.backup {
        processor = processor.with_backup(BackupSet::new(&options.install_dir));
    }

    let profile_root = options.install_dir.join(profile.dir_name());
    let mut totals = ProcessResult::default();

    for spec in INSTALL_DIRS {
        let target = profile_root.join(spec.target);
        let result = match &options.source {
            Some(source_root) => {
                let source = source_root.join(spec.source);
                if !source.is_dir() {
                    continue;
                }
                processor.process_template_directory(&source, &target, spec.pattern)?
            }
            None => process_embedded_directory(&mut processor, spec, &target)?,
        };
        totals.processed += result.processed;
        totals.skipped += result.skipped;
    }

    Ok(ProfileReport {
        profile,
        processed: totals.processed,
        skipped: totals.skipped,
        backed_up: processor.backed_up(),
    })
}

/// Materialize one embedded subtree through the shared per-file pipeline.
fn process_embedded_directory(
    processor: &mut TemplateProcessor,
    spec: DirSpec,
    target_dir: &Path,
) -> Result<ProcessResult, AppError> {
    let pattern = Pattern::new(spec.pattern).map_err(|err| {
        AppError::config_error(format!("Invalid glob pattern '{}': {err}", spec.pattern))
    })?;
    let prefix = format!("{}/", spec.source);

    let mut result = ProcessResult::default();
    for file in assets::core_files() {
        let Some(relative) = file.path.strip_prefix(&prefix) else {
            continue;
        };
        let basename = relative.rsplit('/').next().unwrap_or(relative);
        if !pattern.matches(basename) {
            result.skipped += 1;
            continue;
        }
        processor.process_file_content(file.content, Path::new(relative), target_dir)?;
        result.processed += 1;
    }

    Ok(result)
}

#[derive(Debug, Serialize)]
struct InstallManifest<'a> {
    version: &'a str,
    installed_at: String,
    profiles: &'a [ProfileReport],
}

/// Record the run under `<install_dir>/.niopd/install.toml`.
pub fn write_manifest(report: &InstallReport) -> Result<PathBuf, AppError> {
    let state_dir = report.install_dir.join(STATE_DIR);
    fs::create_dir_all(&state_dir)?;

    let manifest = InstallManifest {
        version: env!("CARGO_PKG_VERSION"),
        installed_at: Utc::now().to_rfc3339(),
        profiles: &report.profiles,
    };

    let path = state_dir.join(MANIFEST_FILE);
    fs::write(&path, toml::to_string_pretty(&manifest)?)?;
    Ok(path)
}
