//! Archive format versions
//!
//! Two layouts exist. Version 0 keeps course content at the archive root with
//! drafts nested inside; version 1 splits the root into `published/` and
//! `drafts/` and records `format.json`.
//!
//! # Example
//!
//! ```ignore
//! use cx_core::format::{FormatConverter, FormatVersionDetector};
//!
//! let version = FormatVersionDetector::detect(&course_dir)?;
//! let converted = FormatConverter::new().convert(&source_dir, &target_dir)?;
//! ```

mod convert;
mod version;

pub use convert::FormatConverter;
pub use version::{ArchiveVersion, ExportManifest, FormatVersionDetector};
