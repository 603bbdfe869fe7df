//! Archive format versions and detection

use crate::archive::{write_file, FORMAT_FILE, FORMAT_KEY};
use crate::error::{CourseExportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Known archive layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveVersion {
    /// Course content at the root, drafts nested inside
    V0,
    /// `published/` and `drafts/` branches plus a format manifest
    V1,
}

impl ArchiveVersion {
    /// Numeric tag stored in the manifest
    pub fn number(self) -> i64 {
        match self {
            ArchiveVersion::V0 => 0,
            ArchiveVersion::V1 => 1,
        }
    }

    /// The other known layout
    pub fn opposite(self) -> Self {
        match self {
            ArchiveVersion::V0 => ArchiveVersion::V1,
            ArchiveVersion::V1 => ArchiveVersion::V0,
        }
    }
}

impl TryFrom<i64> for ArchiveVersion {
    type Error = CourseExportError;

    fn try_from(n: i64) -> Result<Self> {
        match n {
            0 => Ok(ArchiveVersion::V0),
            1 => Ok(ArchiveVersion::V1),
            other => Err(CourseExportError::UnknownVersion(other)),
        }
    }
}

impl fmt::Display for ArchiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Manifest stored as `format.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub export_format: i64,
}

impl ExportManifest {
    /// Write the manifest into a course directory
    pub fn write(&self, course_dir: &Path) -> Result<()> {
        let content = format!("{{\"{}\": {}}}\n", FORMAT_KEY, self.export_format);
        write_file(&course_dir.join(FORMAT_FILE), content.as_bytes())
    }
}

/// Reads the format version of an archive course directory
pub struct FormatVersionDetector;

impl FormatVersionDetector {
    /// Declared version; 0 when there is no manifest
    ///
    /// A manifest without an integer `export_format` is malformed.
    pub fn detect(course_dir: &Path) -> Result<i64> {
        let format_file = course_dir.join(FORMAT_FILE);
        if !format_file.is_file() {
            return Ok(0);
        }

        let content = fs::read_to_string(&format_file)?;
        let data: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            CourseExportError::MalformedArchive(format!("unreadable {}: {}", FORMAT_FILE, e))
        })?;

        data.get(FORMAT_KEY)
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| {
                CourseExportError::MalformedArchive(format!(
                    "{} has no integer \"{}\" entry",
                    FORMAT_FILE, FORMAT_KEY
                ))
            })
    }

    /// Detected version, restricted to the known layouts
    pub fn detect_known(course_dir: &Path) -> Result<ArchiveVersion> {
        ArchiveVersion::try_from(Self::detect(course_dir)?)
    }
}
