//! Course export
//!
//! This module turns a course content tree into an archive directory.
//!
//! # Overview
//!
//! An export consists of:
//! - `course.xml`, the rendered content tree
//! - auxiliary content (`tabs/`, `custom_tags/`, `info/`, `about/`)
//! - policy documents under `policies/<run>/`
//! - unpublished units under `drafts/`
//!
//! # Example
//!
//! ```ignore
//! use cx_core::export::CourseExporter;
//!
//! let summary = CourseExporter::new(&source)
//!     .with_drafts(&source)
//!     .export(&course_address, root_dir, "circuits")?;
//! ```

mod drafts;
mod exporter;
mod extra;
mod policy;
mod render;

pub use drafts::{DraftExporter, DraftReport, INDEX_ATTRIBUTE, PARENT_URL_ATTRIBUTE};
pub use exporter::{CourseExporter, ExportSummary, DRAFT_CATEGORY};
pub use extra::{ExtraCategory, ExtraContentExporter, EXTRA_CONTENT};
pub use policy::PolicyWriter;
pub use render::{RenderContext, TreeSerializer};
