//! JSON course snapshots as a content source

use cx_core::address::ContentAddress;
use cx_core::error::{CourseExportError, Result};
use cx_core::node::{ContentNode, NodeRecord};
use cx_core::source::memory::MemoryContentSource;
use serde::Deserialize;
use std::fs;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// On-disk snapshot of one course's published and draft content
#[derive(Debug, Clone, Deserialize)]
pub struct CourseSnapshot {
    /// Address of the course root node
    pub course: ContentAddress,
    /// Published nodes
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    /// Unpublished nodes; stored at the draft revision on load
    #[serde(default)]
    pub drafts: Vec<NodeRecord>,
}

impl CourseSnapshot {
    /// Read a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CourseExportError::FileNotFound(path.to_path_buf())
            } else {
                CourseExportError::Io(e)
            }
        })?;

        let snapshot: CourseSnapshot = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded snapshot of {} ({} nodes, {} drafts) from {:?}",
            snapshot.course,
            snapshot.nodes.len(),
            snapshot.drafts.len(),
            path
        );
        Ok(snapshot)
    }

    /// Build an in-memory content source holding every node
    pub fn into_source(self) -> Result<SnapshotSource> {
        let mut source = MemoryContentSource::new();
        for record in self.nodes {
            source.insert(ContentNode::from(record));
        }
        for record in self.drafts {
            source.insert_draft(ContentNode::from(record))?;
        }

        Ok(SnapshotSource {
            course: self.course,
            source,
        })
    }
}

/// Content loaded from a snapshot, ready to export
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    course: ContentAddress,
    source: MemoryContentSource,
}

impl SnapshotSource {
    /// Load a snapshot file into memory
    pub fn open(path: &Path) -> Result<Self> {
        CourseSnapshot::load(path)?.into_source()
    }

    /// Address of the course root
    pub fn course(&self) -> &ContentAddress {
        &self.course
    }

    /// Content source for published and draft nodes
    pub fn source(&self) -> &MemoryContentSource {
        &self.source
    }
}
