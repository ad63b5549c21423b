use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, MultiSelect};
use niopd::{AppError, InstallOptions, Profile, ui};

#[derive(Parser)]
#[command(name = "niopd")]
#[command(version)]
#[command(
    about = "Install the NioPD product-management toolkit into AI coding assistants",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install toolkit commands, scripts, agents, and templates
    #[clap(visible_alias = "i")]
    Install {
        /// Target IDE: claude, iflow, or all (prompted when omitted)
        #[arg(long)]
        ide: Option<String>,
        /// Directory to install into (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Install from a toolkit checkout instead of the embedded assets
        #[arg(long)]
        source: Option<PathBuf>,
        /// Fail on placeholders that survive substitution
        #[arg(long)]
        strict: bool,
        /// Skip the backup of overwritten files
        #[arg(long)]
        no_backup: bool,
        /// Skip interactive prompts; installs all IDEs unless --ide is given
        #[arg(short = 'y', long)]
        yes: bool,
        /// Print the install report as JSON when done
        #[arg(long)]
        json: bool,
    },
    /// List supported IDE profiles
    List,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install { ide, dir, source, strict, no_backup, yes, json } => {
            run_install(ide, dir, source, strict, no_backup, yes, json)
        }
        Commands::List => {
            for profile in Profile::ALL {
                println!(
                    "{:<8} {:<12} {}/",
                    profile.name(),
                    profile.display_name(),
                    profile.dir_name()
                );
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_install(
    ide: Option<String>,
    dir: Option<PathBuf>,
    source: Option<PathBuf>,
    strict: bool,
    no_backup: bool,
    yes: bool,
    json: bool,
) -> Result<(), AppError> {
    if !yes {
        ui::welcome();
    }

    let profiles = resolve_profiles(ide.as_deref(), yes)?;
    let install_dir = resolve_install_dir(dir, yes)?;

    if !yes && !confirm_install(&profiles, &install_dir)? {
        ui::warning("Installation cancelled");
        return Ok(());
    }

    let options = InstallOptions { profiles, install_dir, source, strict, backup: !no_backup };

    let report = niopd::install(&options)?;
    ui::summary(&report);

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|err| {
            AppError::Configuration(format!("Failed to serialize install report: {err}"))
        })?;
        println!("{rendered}");
    }

    Ok(())
}

fn resolve_profiles(ide: Option<&str>, yes: bool) -> Result<Vec<Profile>, AppError> {
    match ide {
        Some("all") => Ok(Profile::ALL.to_vec()),
        Some(name) => Ok(vec![Profile::from_name(name)?]),
        None if yes => Ok(Profile::ALL.to_vec()),
        None => prompt_profiles(),
    }
}

fn prompt_profiles() -> Result<Vec<Profile>, AppError> {
    let items: Vec<&str> = Profile::ALL.iter().map(|p| p.display_name()).collect();
    let defaults = vec![true; items.len()];
    let selection = MultiSelect::new()
        .with_prompt("Select the assistants to install for")
        .items(&items)
        .defaults(&defaults)
        .interact()
        .map_err(|err| AppError::Configuration(format!("Failed to select assistants: {err}")))?;

    if selection.is_empty() {
        return Err(AppError::Configuration("No assistant selected".to_string()));
    }
    Ok(selection.into_iter().map(|index| Profile::ALL[index]).collect())
}

fn resolve_install_dir(dir: Option<PathBuf>, yes: bool) -> Result<PathBuf, AppError> {
    match dir {
        Some(dir) => Ok(dir),
        None if yes => Ok(std::env::current_dir()?),
        None => {
            let input: String = Input::new()
                .with_prompt("Install directory")
                .default(".".to_string())
                .interact_text()
                .map_err(|err| {
                    AppError::Configuration(format!("Failed to read install directory: {err}"))
                })?;
            Ok(PathBuf::from(input))
        }
    }
}

fn confirm_install(profiles: &[Profile], install_dir: &Path) -> Result<bool, AppError> {
    let names: Vec<&str> = profiles.iter().map(|p| p.display_name()).collect();
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Install NioPD for {} into {}?",
            names.join(", "),
            install_dir.display()
        ))
        .default(true)
        .interact_opt()
        .map_err(|err| AppError::Configuration(format!("Failed to confirm installation: {err}")))?;
    Ok(confirmed.unwrap_or(false))
}
