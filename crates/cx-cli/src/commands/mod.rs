//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod convert;
pub mod detect;
pub mod export;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cx_core::config::Config;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file
pub const LOCAL_CONFIG: &str = ".coursex/config.toml";

/// coursex - export course content and convert archive layouts
#[derive(Debug, Parser)]
#[command(name = "coursex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COURSEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export a course snapshot into an archive directory
    Export(export::ExportArgs),

    /// Convert an archive between format versions
    Convert(convert::ConvertArgs),

    /// Print the format version of an archive course directory
    Detect(detect::DetectArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Export(args) => export::execute(args, &load_config(config_path)?),
        Commands::Convert(args) => convert::execute(args, &load_config(config_path)?),
        Commands::Detect(args) => detect::execute(args),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// User-level configuration file
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "coursex", "coursex")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Resolve which configuration file applies, if any
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    user_config_path().filter(|p| p.is_file())
}

/// Load configuration: explicit path, then project-local, then user-level, then defaults
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!("Loading configuration from {:?}", path);
            Config::load(&path).with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_explicit_config_wins() {
        let path = PathBuf::from("/tmp/custom.toml");
        assert_eq!(resolve_config_path(Some(path.as_path())), Some(path.clone()));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let result = load_config(Some(Path::new("/nonexistent/coursex.toml")));
        assert!(result.is_err());
    }
}
