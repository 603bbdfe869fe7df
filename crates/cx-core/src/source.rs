//! Content source, draft source and asset store abstractions

use crate::address::{ContentAddress, DRAFT_REVISION};
use crate::error::{CourseExportError, Result};
use crate::node::ContentNode;
use std::path::Path;

/// Parent of a draft unit, as seen by the published tree
#[derive(Debug, Clone, PartialEq)]
pub struct ParentLink {
    pub address: ContentAddress,
    /// The parent's child sequence
    pub children: Vec<ContentAddress>,
}

impl ParentLink {
    /// Position of `unit` among the parent's children, ignoring revisions
    pub fn index_of(&self, unit: &ContentAddress) -> Option<usize> {
        let unit = unit.without_revision();
        self.children
            .iter()
            .position(|child| child.without_revision() == unit)
    }
}

/// Trait for published content sources
pub trait ContentSource: Send + Sync {
    /// Load a single node
    fn get_item(&self, address: &ContentAddress) -> Result<ContentNode>;

    /// All nodes of `category` within a course
    fn get_items(&self, org: &str, course: &str, category: &str) -> Result<Vec<ContentNode>>;

    /// Load the course root node
    fn get_course(&self, course: &ContentAddress) -> Result<ContentNode> {
        self.get_item(course)
    }
}

/// Trait for sources of unpublished content
pub trait DraftSource: Send + Sync {
    /// Draft units of `category` within a course
    fn draft_items(&self, org: &str, course: &str, category: &str) -> Result<Vec<ContentNode>>;

    /// Resolve the published parent of a draft unit
    fn parent_of(&self, unit: &ContentAddress) -> Result<Option<ParentLink>>;

    /// Load a node at its draft revision, falling back to the published one
    fn get_draft_item(&self, address: &ContentAddress) -> Result<ContentNode>;
}

/// Trait for stores holding a course's binary assets
pub trait AssetStore: Send + Sync {
    /// Copy all assets into `static_dir` and write a manifest to `manifest_path`
    fn export_all_for_course(
        &self,
        course: &ContentAddress,
        static_dir: &Path,
        manifest_path: &Path,
    ) -> Result<()>;
}

/// In-memory content source holding published and draft nodes
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory content source
    #[derive(Debug, Default, Clone)]
    pub struct MemoryContentSource {
        published: BTreeMap<ContentAddress, ContentNode>,
        drafts: BTreeMap<ContentAddress, ContentNode>,
    }

    impl MemoryContentSource {
        /// Create an empty source
        pub fn new() -> Self {
            Self::default()
        }

        /// Insert a node; draft-revision addresses go to the draft branch
        pub fn insert(&mut self, node: ContentNode) {
            if node.address.is_draft() {
                self.drafts.insert(node.address.clone(), node);
            } else {
                self.published.insert(node.address.clone(), node);
            }
        }

        /// Insert an unpublished copy of a node
        pub fn insert_draft(&mut self, mut node: ContentNode) -> Result<()> {
            node.address = node.address.with_revision(DRAFT_REVISION)?;
            self.drafts.insert(node.address.clone(), node);
            Ok(())
        }

        /// Number of published nodes
        pub fn len(&self) -> usize {
            self.published.len()
        }

        pub fn is_empty(&self) -> bool {
            self.published.is_empty()
        }

        /// Number of draft nodes
        pub fn draft_count(&self) -> usize {
            self.drafts.len()
        }

        fn select<'a>(
            nodes: &'a BTreeMap<ContentAddress, ContentNode>,
            org: &'a str,
            course: &'a str,
            category: &'a str,
        ) -> impl Iterator<Item = &'a ContentNode> + 'a {
            nodes.values().filter(move |n| {
                n.address.org() == org
                    && n.address.course() == course
                    && n.address.category() == category
            })
        }
    }

    impl ContentSource for MemoryContentSource {
        fn get_item(&self, address: &ContentAddress) -> Result<ContentNode> {
            self.published
                .get(address)
                .or_else(|| self.published.get(&address.without_revision()))
                .cloned()
                .ok_or_else(|| CourseExportError::NodeNotFound(address.to_string()))
        }

        fn get_items(&self, org: &str, course: &str, category: &str) -> Result<Vec<ContentNode>> {
            Ok(Self::select(&self.published, org, course, category)
                .cloned()
                .collect())
        }
    }

    impl DraftSource for MemoryContentSource {
        fn draft_items(&self, org: &str, course: &str, category: &str) -> Result<Vec<ContentNode>> {
            Ok(Self::select(&self.drafts, org, course, category)
                .cloned()
                .collect())
        }

        fn parent_of(&self, unit: &ContentAddress) -> Result<Option<ParentLink>> {
            let unit = unit.without_revision();
            let parent = self
                .published
                .values()
                .find(|n| n.children.iter().any(|c| c.without_revision() == unit));

            Ok(parent.map(|p| ParentLink {
                address: p.address.clone(),
                children: p.children.clone(),
            }))
        }

        fn get_draft_item(&self, address: &ContentAddress) -> Result<ContentNode> {
            let draft = address.with_revision(DRAFT_REVISION)?;
            match self.drafts.get(&draft) {
                Some(node) => Ok(node.clone()),
                None => self.get_item(address),
            }
        }
    }

}
