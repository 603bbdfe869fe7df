//! Export command
//!
//! Export a course snapshot into an archive directory.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use cx_core::config::Config;
use cx_core::export::CourseExporter;
use cx_storage::{DirectoryAssetStore, SnapshotSource};

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Course snapshot (JSON) to export
    #[arg(long, short)]
    pub snapshot: PathBuf,

    /// Directory the course directory is created in
    #[arg(long, short)]
    pub output: PathBuf,

    /// Name of the course directory (defaults to the course name)
    #[arg(long)]
    pub course_dir: Option<String>,

    /// Directory of static assets to copy into the archive
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Skip unpublished content
    #[arg(long)]
    pub no_drafts: bool,

    /// Write indented XML
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the export command
pub fn execute(args: ExportArgs, config: &Config) -> Result<()> {
    let snapshot = SnapshotSource::open(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    let mut export_config = config.export.clone();
    if args.no_drafts {
        export_config.include_drafts = false;
    }
    if args.pretty {
        export_config.pretty_xml = true;
    }

    let course = snapshot.course();
    let course_dir = args
        .course_dir
        .clone()
        .unwrap_or_else(|| course.course().to_string());

    let asset_store = args
        .assets
        .as_ref()
        .map(DirectoryAssetStore::new)
        .transpose()
        .context("Failed to open asset directory")?;

    let mut exporter = CourseExporter::new(snapshot.source())
        .with_drafts(snapshot.source())
        .with_config(export_config);
    if let Some(store) = asset_store.as_ref() {
        exporter = exporter.with_assets(store);
    }

    eprintln!("Exporting {}...", course.to_string().cyan());

    let summary = exporter
        .export(course, &args.output, &course_dir)
        .with_context(|| format!("Failed to export {}", course))?;

    for (dirname, count) in &summary.extra_files {
        eprintln!("  {} {} file(s)", format!("{}/", dirname).dimmed(), count);
    }
    if summary.drafts.written > 0 || summary.drafts.orphans > 0 {
        eprintln!(
            "  {} {} written, {} orphan(s) skipped",
            "drafts/".dimmed(),
            summary.drafts.written.to_string().yellow(),
            summary.drafts.orphans
        );
    }
    eprintln!(
        "{} Exported to {}",
        "✓".green(),
        summary.course_dir.display()
    );

    Ok(())
}
