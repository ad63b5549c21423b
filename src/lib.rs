//! niopd: Install the NioPD product-management toolkit into AI coding
//! assistant integration directories.
//!
//! The toolkit ships command, script, agent, and template assets whose
//! contents reference assistant-specific paths through `{{NAME}}`
//! placeholders. Installation resolves each selected profile's variable
//! table, substitutes placeholders, strips the `.template` filename marker,
//! and mirrors the source subtrees under the profile's own root directory
//! (`.claude/`, `.iflow/`), keeping side-by-side installations isolated.

pub mod assets;
pub mod backup;
pub mod error;
pub mod installer;
pub mod materialize;
pub mod profile;
pub mod template;
pub mod ui;

pub use backup::BackupSet;
pub use error::AppError;
pub use installer::{DirSpec, INSTALL_DIRS, InstallOptions, InstallReport, ProfileReport};
pub use materialize::{FileTask, ProcessResult, TEMPLATE_SUFFIX, TemplateProcessor};
pub use profile::{Profile, TOOLKIT_NAMESPACE, VariableTable};

/// Install the toolkit for every requested profile.
///
/// Materializes each toolkit subtree once per profile, writes the install
/// manifest, and reports per-profile progress on stdout. Profiles are
/// installed in the order given; a failure aborts the run after the
/// profiles already completed.
pub fn install(options: &InstallOptions) -> Result<InstallReport, AppError> {
    let mut profiles = Vec::new();

    for &profile in &options.profiles {
        ui::step(&format!("Installing for {}", profile.display_name()));
        let report = installer::install_profile(profile, options)?;
        ui::success(&format!(
            "{}: {} files installed under {}",
            profile.display_name(),
            report.processed,
            options.install_dir.join(profile.dir_name()).display()
        ));
        profiles.push(report);
    }

    let report = InstallReport { install_dir: options.install_dir.clone(), profiles };
    installer::write_manifest(&report)?;
    Ok(report)
}
