//! cx-core - Core library for coursex
//!
//! This crate exports course content trees into versioned archive directories
//! and converts existing archives between the known layout versions.

pub mod address;
pub mod archive;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod node;
pub mod source;
pub mod value;
pub mod xml;

pub use address::ContentAddress;
pub use error::{CourseExportError, Result};
pub use node::{ContentNode, NodeKind};
