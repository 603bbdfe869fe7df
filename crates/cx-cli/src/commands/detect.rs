//! Detect command
//!
//! Print the format version of an archive course directory.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use cx_core::format::FormatVersionDetector;

/// Arguments for the detect command
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Archive course directory
    pub course_dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the detect command
pub fn execute(args: DetectArgs) -> Result<()> {
    if !args.course_dir.is_dir() {
        anyhow::bail!("Not a directory: {}", args.course_dir.display());
    }

    let version = FormatVersionDetector::detect(&args.course_dir)
        .with_context(|| format!("Failed to read format of {}", args.course_dir.display()))?;

    if args.json {
        println!("{}", serde_json::json!({ "export_format": version }));
    } else {
        println!("{}", version);
    }
    Ok(())
}
