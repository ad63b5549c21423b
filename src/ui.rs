//! Console presentation for the installer: banner, step headers, and the
//! final summary.

use crate::installer::InstallReport;

/// Welcome banner shown before the interactive flow.
pub fn welcome() {
    println!(
        "NioPD installer v{}\n\
         Installs the product-management toolkit into your AI coding assistants.\n",
        env!("CARGO_PKG_VERSION")
    );
}

/// Step header.
pub fn step(message: &str) {
    println!("\n📋 {message}");
}

pub fn info(message: &str) {
    println!("ℹ️  {message}");
}

pub fn success(message: &str) {
    println!("✅ {message}");
}

pub fn warning(message: &str) {
    println!("⚠️  {message}");
}

pub fn error(message: &str) {
    eprintln!("❌ {message}");
}

/// Final summary of an install run.
pub fn summary(report: &InstallReport) {
    println!("\n🎉 Installation complete");
    println!("Install directory: {}", report.install_dir.display());
    for profile in &report.profiles {
        println!(
            "  {:<12} {} files installed, {} backed up",
            profile.profile.display_name(),
            profile.processed,
            profile.backed_up
        );
    }
    println!("Total files: {}", report.total_processed());
    if report.total_backed_up() > 0 {
        println!("Backups: {} (under .niopd/backups/)", report.total_backed_up());
    }
    println!("\nNext steps:");
    println!("  1. Open your assistant in the install directory");
    println!("  2. Run /niopd:init to create the workspace");
    println!("  3. Start something: /niopd:new-initiative \"my-initiative\"");
}
