//! Course exporter: produces one complete archive directory for a course

use super::drafts::{DraftExporter, DraftReport};
use super::extra::{ExtraContentExporter, EXTRA_CONTENT};
use super::policy::PolicyWriter;
use super::render::{RenderContext, TreeSerializer};
use crate::address::ContentAddress;
use crate::archive::{write_file, ASSETS_FILE, COURSE_XML, POLICIES_DIR, STATIC_DIR};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::source::{AssetStore, ContentSource, DraftSource};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Category of the top-most draftable container
pub const DRAFT_CATEGORY: &str = "vertical";

/// What a finished export produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    /// Archive course directory
    pub course_dir: PathBuf,
    /// Files written per auxiliary subdirectory
    pub extra_files: BTreeMap<String, usize>,
    /// Draft units written and skipped
    pub drafts: DraftReport,
}

/// Sequences tree, asset, auxiliary, policy and draft export
pub struct CourseExporter<'a> {
    source: &'a dyn ContentSource,
    assets: Option<&'a dyn AssetStore>,
    drafts: Option<&'a dyn DraftSource>,
    config: ExportConfig,
}

impl<'a> CourseExporter<'a> {
    /// Create an exporter over a published content source
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self {
            source,
            assets: None,
            drafts: None,
            config: ExportConfig::default(),
        }
    }

    /// Copy assets through `store`
    pub fn with_assets(mut self, store: &'a dyn AssetStore) -> Self {
        self.assets = Some(store);
        self
    }

    /// Export unpublished units from `drafts`
    pub fn with_drafts(mut self, drafts: &'a dyn DraftSource) -> Self {
        self.drafts = Some(drafts);
        self
    }

    /// Set the export configuration
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Export `course` into `<root_dir>/<course_dir>`
    ///
    /// The first failing step aborts the export; the partial directory is left as is.
    pub fn export(
        &self,
        course: &ContentAddress,
        root_dir: &Path,
        course_dir: &str,
    ) -> Result<ExportSummary> {
        let export_dir = root_dir.join(course_dir);
        let course_node = self.source.get_course(course)?;

        let ctx = RenderContext::new(self.source);
        let root = TreeSerializer::serialize(&course_node, &ctx)?;
        let xml = match self.config.xml_indent() {
            Some(width) => root.to_pretty_string(width),
            None => root.to_xml_string(),
        };
        write_file(&export_dir.join(COURSE_XML), xml.as_bytes())?;

        if self.config.include_assets {
            if let Some(store) = self.assets {
                store.export_all_for_course(
                    course,
                    &export_dir.join(STATIC_DIR),
                    &export_dir.join(POLICIES_DIR).join(ASSETS_FILE),
                )?;
            }
        }

        let mut summary = ExportSummary {
            course_dir: export_dir.clone(),
            ..Default::default()
        };

        for extra in EXTRA_CONTENT.iter() {
            let units = self
                .source
                .get_items(course.org(), course.course(), extra.category)?;
            let written =
                ExtraContentExporter::export(&export_dir, &units, extra.dirname, extra.suffix)?;
            if written > 0 {
                summary.extra_files.insert(extra.dirname.to_string(), written);
            }
        }

        let grading_policy = course_node
            .grading_policy
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        PolicyWriter::write(
            &export_dir,
            course_node.name(),
            &course_node.metadata,
            &grading_policy,
        )?;

        if self.config.include_drafts {
            if let Some(drafts) = self.drafts {
                let units = drafts.draft_items(course.org(), course.course(), DRAFT_CATEGORY)?;
                summary.drafts = DraftExporter::new(drafts)
                    .with_indent(self.config.xml_indent())
                    .export(&export_dir, &units, course, |unit| drafts.parent_of(unit))?;
            }
        }

        info!(
            "Exported {} to {:?} ({} drafts, {} orphans skipped)",
            course, export_dir, summary.drafts.written, summary.drafts.orphans
        );
        Ok(summary)
    }
}
