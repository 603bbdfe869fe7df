//! Error types for coursex

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for coursex
#[derive(Debug, Error)]
pub enum CourseExportError {
    /// Address string does not match the canonical shape
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Value has no JSON encoding
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Archive directory does not match the layout for its version
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// Archive declares a format version we cannot convert
    #[error("Unknown archive format version: {0}")]
    UnknownVersion(i64),

    /// Content node referenced but missing from the content source
    #[error("Content node not found: {0}")]
    NodeNotFound(String),

    /// Draft unit whose parent does not list it as a child
    #[error("Draft {unit} is not a child of {parent}")]
    DraftPlacement { unit: String, parent: String },

    /// Conversion target already holds a course directory
    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CourseExportError>,
    },
}

impl CourseExportError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CourseExportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for CourseExportError {
    fn from(err: toml::de::Error) -> Self {
        CourseExportError::Toml(err.to_string())
    }
}

impl From<walkdir::Error> for CourseExportError {
    fn from(err: walkdir::Error) -> Self {
        let message = err.to_string();
        match err.into_io_error() {
            Some(io) => CourseExportError::Io(io),
            None => CourseExportError::Io(std::io::Error::new(std::io::ErrorKind::Other, message)),
        }
    }
}

/// Result type alias for coursex
pub type Result<T> = std::result::Result<T, CourseExportError>;
