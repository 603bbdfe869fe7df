//! Export of flat auxiliary content (tabs, custom tags, updates, about pages)

use crate::archive::write_file;
use crate::error::Result;
use crate::node::ContentNode;
use std::path::Path;
use tracing::debug;

/// Where one category of auxiliary content lands in the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraCategory {
    /// Address category queried from the content source
    pub category: &'static str,
    /// Archive subdirectory
    pub dirname: &'static str,
    /// File name suffix
    pub suffix: &'static str,
}

/// Auxiliary content categories, in export order
pub const EXTRA_CONTENT: [ExtraCategory; 4] = [
    ExtraCategory {
        category: "static_tab",
        dirname: "tabs",
        suffix: ".html",
    },
    ExtraCategory {
        category: "custom_tag_template",
        dirname: "custom_tags",
        suffix: "",
    },
    ExtraCategory {
        category: "course_info",
        dirname: "info",
        suffix: ".html",
    },
    ExtraCategory {
        category: "about",
        dirname: "about",
        suffix: ".html",
    },
];

/// Writes one file per unit under a named subdirectory
pub struct ExtraContentExporter;

impl ExtraContentExporter {
    /// Export `units` to `<destination>/<dirname>/<name><suffix>`
    ///
    /// Nothing is created when `units` is empty. Returns the number of files written.
    pub fn export(
        destination: &Path,
        units: &[ContentNode],
        dirname: &str,
        suffix: &str,
    ) -> Result<usize> {
        if units.is_empty() {
            return Ok(0);
        }

        let item_dir = destination.join(dirname);
        for unit in units {
            let path = item_dir.join(format!("{}{}", unit.name(), suffix));
            write_file(&path, unit.data.as_bytes())?;
        }

        debug!("Exported {} units to {:?}", units.len(), item_dir);
        Ok(units.len())
    }
}
