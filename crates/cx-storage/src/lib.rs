//! cx-storage - File system collaborators for coursex
//!
//! This crate provides a JSON snapshot content source and a directory-backed
//! asset store for the course exporter.

mod assets;
mod snapshot;

pub use assets::{AssetEntry, AssetManifest, DirectoryAssetStore};
pub use snapshot::{CourseSnapshot, SnapshotSource};
