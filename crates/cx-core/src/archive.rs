//! Archive layout constants and file helpers

use crate::error::{CourseExportError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Serialized course tree
pub const COURSE_XML: &str = "course.xml";
/// Policy documents, one subdirectory per course run
pub const POLICIES_DIR: &str = "policies";
pub const POLICY_FILE: &str = "policy.json";
pub const GRADING_POLICY_FILE: &str = "grading_policy.json";
/// Asset manifest written by the asset store
pub const ASSETS_FILE: &str = "assets.json";
/// Binary assets
pub const STATIC_DIR: &str = "static";
/// Unpublished content
pub const DRAFT_DIR: &str = "drafts";
/// Published branch of a version 1 archive
pub const PUBLISHED_DIR: &str = "published";
/// Format manifest at the root of a version 1 archive
pub const FORMAT_FILE: &str = "format.json";
pub const FORMAT_KEY: &str = "export_format";

/// Write a file atomically (write to temp, then rename), creating parents
pub fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CourseExportError::Config(format!("invalid file path: {}", path.display())))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.flush()?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CourseExportError::Io(e)
    })?;

    debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// Recursively copy `source` to `target`; `target` must not exist yet
pub fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        return Err(CourseExportError::DestinationExists(target.to_path_buf()));
    }

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| CourseExportError::Config(e.to_string()))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            fs::copy(entry.path(), &destination)?;
        }
    }

    debug!("Copied {:?} to {:?}", source, target);
    Ok(())
}
