//! Directory-backed asset store

use cx_core::address::ContentAddress;
use cx_core::archive::write_file;
use cx_core::error::{CourseExportError, Result};
use cx_core::source::AssetStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Manifest entry for one exported asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// blake3 hash of the content, hex encoded
    pub hash: String,
    /// Size in bytes
    pub size: u64,
}

/// Asset manifest keyed by path relative to `static/`
pub type AssetManifest = BTreeMap<String, AssetEntry>;

/// Serves a course's assets from a plain directory
pub struct DirectoryAssetStore {
    /// Directory holding the asset files
    root: PathBuf,
}

impl DirectoryAssetStore {
    /// Create a store over an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CourseExportError::FileNotFound(root));
        }
        Ok(Self { root })
    }

    /// Get the asset directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_name(&self, path: &Path) -> Result<String> {
        let relative = path
            .strip_prefix(&self.root)
            .map_err(|e| CourseExportError::Config(e.to_string()))?;
        Ok(relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }
}

impl AssetStore for DirectoryAssetStore {
    fn export_all_for_course(
        &self,
        course: &ContentAddress,
        static_dir: &Path,
        manifest_path: &Path,
    ) -> Result<()> {
        let mut manifest = AssetManifest::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = self.relative_name(entry.path())?;
            let bytes = fs::read(entry.path())?;
            write_file(&static_dir.join(&name), &bytes)?;

            manifest.insert(
                name,
                AssetEntry {
                    hash: blake3::hash(&bytes).to_hex().to_string(),
                    size: bytes.len() as u64,
                },
            );
        }

        let json = serde_json::to_string_pretty(&manifest)?;
        write_file(manifest_path, json.as_bytes())?;

        debug!(
            "Exported {} assets for {} into {:?}",
            manifest.len(),
            course,
            static_dir
        );
        Ok(())
    }
}
