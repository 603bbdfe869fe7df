//! Config command
//!
//! Show or create coursex configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{load_config, resolve_config_path, LOCAL_CONFIG};
use cx_core::config::Config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(explicit, json),
        ConfigCommand::Init { force } => init_config(explicit, force),
    }
}

fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
    let config = load_config(explicit)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    match resolve_config_path(explicit) {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(defaults)".dimmed()),
    }
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}

fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG));

    if path.exists() && !force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&path, Config::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    eprintln!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}
