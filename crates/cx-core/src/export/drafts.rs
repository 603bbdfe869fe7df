//! Export of unpublished content units

use super::render::{RenderContext, TreeSerializer};
use crate::address::ContentAddress;
use crate::archive::{write_file, DRAFT_DIR};
use crate::error::{CourseExportError, Result};
use crate::node::ContentNode;
use crate::source::{ContentSource, DraftSource, ParentLink};
use std::path::Path;
use tracing::debug;

/// Attribute carrying the parent's canonical address
pub const PARENT_URL_ATTRIBUTE: &str = "parent_sequential_url";
/// Attribute carrying the unit's position among its parent's children
pub const INDEX_ATTRIBUTE: &str = "index_in_children_list";

/// Outcome of a draft export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftReport {
    pub written: usize,
    pub orphans: usize,
}

/// Child lookup for draft fragments: draft revision first, then published
struct DraftView<'a>(&'a dyn DraftSource);

impl ContentSource for DraftView<'_> {
    fn get_item(&self, address: &ContentAddress) -> Result<ContentNode> {
        self.0.get_draft_item(address)
    }

    fn get_items(&self, org: &str, course: &str, category: &str) -> Result<Vec<ContentNode>> {
        self.0.draft_items(org, course, category)
    }
}

/// Writes draft units as standalone fragments under `drafts/`
pub struct DraftExporter<'a> {
    drafts: &'a dyn DraftSource,
    indent: Option<usize>,
}

impl<'a> DraftExporter<'a> {
    /// Create an exporter resolving children through `drafts`
    pub fn new(drafts: &'a dyn DraftSource) -> Self {
        Self {
            drafts,
            indent: None,
        }
    }

    /// Pretty-print fragments with the given indent width
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Export every unit that has a parent inside `course_root`'s course
    ///
    /// Orphans are skipped. A unit its parent does not list is an error.
    pub fn export<F>(
        &self,
        destination: &Path,
        units: &[ContentNode],
        course_root: &ContentAddress,
        resolve_parent: F,
    ) -> Result<DraftReport>
    where
        F: Fn(&ContentAddress) -> Result<Option<ParentLink>>,
    {
        let mut report = DraftReport::default();
        let draft_dir = destination.join(DRAFT_DIR);
        let view = DraftView(self.drafts);

        for unit in units {
            let parent = resolve_parent(&unit.address)?.filter(|p| {
                p.address.org() == course_root.org() && p.address.course() == course_root.course()
            });

            let Some(parent) = parent else {
                debug!("Skipping orphaned draft {}", unit.address);
                report.orphans += 1;
                continue;
            };

            let index = parent
                .index_of(&unit.address)
                .ok_or_else(|| CourseExportError::DraftPlacement {
                    unit: unit.address.to_string(),
                    parent: parent.address.to_string(),
                })?;

            let ctx = RenderContext::new(&view)
                .with_attribute(&unit.address, PARENT_URL_ATTRIBUTE, parent.address.encode())
                .with_attribute(&unit.address, INDEX_ATTRIBUTE, index.to_string());
            let element = TreeSerializer::serialize(unit, &ctx)?;

            let xml = match self.indent {
                Some(width) => element.to_pretty_string(width),
                None => element.to_xml_string(),
            };
            let path = draft_dir
                .join(unit.kind.category())
                .join(format!("{}.xml", unit.name()));
            write_file(&path, xml.as_bytes())?;

            debug!("Exported draft {} at index {} of {}", unit.address, index, parent.address);
            report.written += 1;
        }

        Ok(report)
    }
}
