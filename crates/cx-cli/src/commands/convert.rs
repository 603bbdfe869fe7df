//! Convert command
//!
//! Convert an archive between format versions 0 and 1.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use cx_core::config::Config;
use cx_core::format::FormatConverter;

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Directory holding exactly one course directory
    pub source: PathBuf,

    /// Directory the converted course directory is written into
    pub target: PathBuf,

    /// Replace an existing course directory in the target
    #[arg(long)]
    pub overwrite: bool,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs, config: &Config) -> Result<()> {
    let mut convert_config = config.convert.clone();
    if args.overwrite {
        convert_config.overwrite = true;
    }

    let version = FormatConverter::new()
        .with_config(convert_config)
        .convert(&args.source, &args.target)
        .with_context(|| format!("Failed to convert {}", args.source.display()))?;

    eprintln!(
        "{} Converted to format version {} in {}",
        "✓".green(),
        version.to_string().yellow(),
        args.target.display()
    );
    Ok(())
}
