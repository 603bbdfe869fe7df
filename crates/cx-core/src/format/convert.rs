//! Conversion between archive layouts

use super::version::{ArchiveVersion, ExportManifest, FormatVersionDetector};
use crate::archive::{copy_tree, DRAFT_DIR, PUBLISHED_DIR};
use crate::config::ConvertConfig;
use crate::error::{CourseExportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Converts an archive from one known layout to the other
///
/// The source directory is never modified.
#[derive(Debug, Clone, Default)]
pub struct FormatConverter {
    config: ConvertConfig,
}

impl FormatConverter {
    /// Create a converter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conversion configuration
    pub fn with_config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    /// Convert the archive in `source_dir`, writing into `target_dir`
    ///
    /// Returns the version of the written archive.
    pub fn convert(&self, source_dir: &Path, target_dir: &Path) -> Result<ArchiveVersion> {
        let course_name = Self::course_name(source_dir)?;
        let source_course = source_dir.join(&course_name);

        let original = FormatVersionDetector::detect_known(&source_course)?;
        let desired = original.opposite();

        let copy_root = target_dir.join(&course_name);
        Self::ensure_disjoint(&source_course, &copy_root)?;
        self.prepare_destination(&copy_root)?;

        match desired {
            ArchiveVersion::V1 => Self::convert_to_v1(&source_course, &copy_root)?,
            ArchiveVersion::V0 => Self::convert_to_v0(&source_course, &copy_root)?,
        }

        info!(
            "Converted {:?} from version {} to version {} at {:?}",
            source_course, original, desired, copy_root
        );
        Ok(desired)
    }

    /// Name of the single course directory at the top of `source_dir`
    fn course_name(source_dir: &Path) -> Result<String> {
        let entries = fs::read_dir(source_dir)?.collect::<std::io::Result<Vec<_>>>()?;

        let single_dir = match entries.as_slice() {
            [entry] if entry.file_type()?.is_dir() => Some(entry),
            _ => None,
        };
        let entry = single_dir.ok_or_else(|| {
            CourseExportError::MalformedArchive(
                "source archive does not have single course directory at top level".to_string(),
            )
        })?;

        entry.file_name().into_string().map_err(|name| {
            CourseExportError::MalformedArchive(format!("non UTF-8 course directory name {:?}", name))
        })
    }

    /// The destination may neither be, contain, nor sit inside the source course
    fn ensure_disjoint(source_course: &Path, copy_root: &Path) -> Result<()> {
        let source = resolve_path(source_course)?;
        let target = resolve_path(copy_root)?;
        if source.starts_with(&target) || target.starts_with(&source) {
            return Err(CourseExportError::MalformedArchive(format!(
                "destination {:?} overlaps source course {:?}",
                copy_root, source_course
            )));
        }
        Ok(())
    }

    fn prepare_destination(&self, copy_root: &Path) -> Result<()> {
        if !copy_root.exists() {
            return Ok(());
        }
        if !self.config.overwrite {
            return Err(CourseExportError::DestinationExists(copy_root.to_path_buf()));
        }
        warn!("Replacing existing destination {:?}", copy_root);
        fs::remove_dir_all(copy_root)?;
        Ok(())
    }

    fn convert_to_v1(source_course: &Path, copy_root: &Path) -> Result<()> {
        fs::create_dir_all(copy_root)?;
        ExportManifest {
            export_format: ArchiveVersion::V1.number(),
        }
        .write(copy_root)?;

        Self::copy_drafts(source_course, copy_root)?;

        let published_dir = copy_root.join(PUBLISHED_DIR);
        copy_tree(source_course, &published_dir)?;

        // Drafts now live beside published/, not inside it
        let nested_drafts = published_dir.join(DRAFT_DIR);
        if nested_drafts.is_dir() {
            fs::remove_dir_all(&nested_drafts)?;
            debug!("Removed nested drafts at {:?}", nested_drafts);
        }
        Ok(())
    }

    fn convert_to_v0(source_course: &Path, copy_root: &Path) -> Result<()> {
        let published_dir = source_course.join(PUBLISHED_DIR);
        if !published_dir.is_dir() {
            return Err(CourseExportError::MalformedArchive(
                "a version 1 archive must contain a published branch".to_string(),
            ));
        }

        copy_tree(&published_dir, copy_root)?;
        Self::copy_drafts(source_course, copy_root)?;

        for ignored in Self::other_branches(source_course)? {
            warn!("Ignoring branch {:?} of version 1 archive", ignored);
        }
        Ok(())
    }

    fn copy_drafts(source_course: &Path, copy_root: &Path) -> Result<()> {
        let draft_dir = source_course.join(DRAFT_DIR);
        if draft_dir.is_dir() {
            copy_tree(&draft_dir, &copy_root.join(DRAFT_DIR))?;
        }
        Ok(())
    }

    fn other_branches(source_course: &Path) -> Result<Vec<PathBuf>> {
        let mut ignored = Vec::new();
        for entry in fs::read_dir(source_course)? {
            let entry = entry?;
            let name = entry.file_name();
            if name != PUBLISHED_DIR && name != DRAFT_DIR && entry.file_type()?.is_dir() {
                ignored.push(entry.path());
            }
        }
        Ok(ignored)
    }
}

/// Canonical form of `path`, which need not exist yet
///
/// The longest existing prefix is canonicalized and the missing tail appended.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let mut base = path.to_path_buf();
    let mut tail = Vec::new();
    while !base.as_os_str().is_empty() && !base.exists() {
        match base.file_name() {
            Some(name) => tail.push(name.to_os_string()),
            None => break,
        }
        base.pop();
    }
    if base.as_os_str().is_empty() {
        base = PathBuf::from(".");
    }

    let mut resolved = base.canonicalize()?;
    for name in tail.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn create_v0_archive(root: &Path, with_drafts: bool) {
        let course = root.join("circuits");
        write(&course.join("course.xml"), r#"<course url_name="2012_Fall"/>"#);
        write(&course.join("policies/2012_Fall/policy.json"), r#"{"course/2012_Fall": {}}"#);
        write(&course.join("policies/2012_Fall/grading_policy.json"), "{}");
        write(&course.join("static/logo.png"), "PNG");
        if with_drafts {
            write(&course.join("drafts/vertical/v1.xml"), "<vertical/>");
        }
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_v0_to_v1() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        create_v0_archive(&source, true);
        fs::create_dir_all(&target).unwrap();

        let version = FormatConverter::new().convert(&source, &target).unwrap();

        assert_eq!(version, ArchiveVersion::V1);
        let root = target.join("circuits");
        assert_eq!(read(&root.join("format.json")), "{\"export_format\": 1}\n");
        assert_eq!(read(&root.join("published/course.xml")), r#"<course url_name="2012_Fall"/>"#);
        assert_eq!(read(&root.join("published/static/logo.png")), "PNG");
        assert_eq!(read(&root.join("drafts/vertical/v1.xml")), "<vertical/>");
        assert!(!root.join("published/drafts").exists());
        assert!(!root.join("course.xml").exists());

        // source untouched
        assert!(source.join("circuits/drafts/vertical/v1.xml").is_file());
        assert!(!source.join("circuits/format.json").exists());
    }

    #[test]
    fn test_v1_to_v0() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let course = source.join("circuits");
        write(&course.join("format.json"), r#"{"export_format": 1}"#);
        write(&course.join("published/course.xml"), "<course/>");
        write(&course.join("drafts/vertical/v1.xml"), "<vertical/>");
        write(&course.join("experimental/notes.txt"), "ignored");
        let target = temp.path().join("target");

        let version = FormatConverter::new().convert(&source, &target).unwrap();

        assert_eq!(version, ArchiveVersion::V0);
        let root = target.join("circuits");
        assert_eq!(read(&root.join("course.xml")), "<course/>");
        assert_eq!(read(&root.join("drafts/vertical/v1.xml")), "<vertical/>");
        assert!(!root.join("experimental").exists());
        assert!(!root.join("format.json").exists());
    }

    #[test]
    fn test_round_trip_without_drafts() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("v0");
        let middle = temp.path().join("v1");
        let back = temp.path().join("back");
        create_v0_archive(&source, false);

        let converter = FormatConverter::new();
        assert_eq!(converter.convert(&source, &middle).unwrap(), ArchiveVersion::V1);
        assert_eq!(converter.convert(&middle, &back).unwrap(), ArchiveVersion::V0);

        for file in [
            "course.xml",
            "policies/2012_Fall/policy.json",
            "policies/2012_Fall/grading_policy.json",
            "static/logo.png",
        ] {
            assert_eq!(
                fs::read(back.join("circuits").join(file)).unwrap(),
                fs::read(source.join("circuits").join(file)).unwrap(),
                "{} differs after round trip",
                file
            );
        }
    }

    #[test]
    fn test_v1_without_published_fails() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        write(&source.join("circuits/format.json"), r#"{"export_format": 1}"#);
        write(&source.join("circuits/drafts/vertical/v1.xml"), "<vertical/>");

        let result = FormatConverter::new().convert(&source, &temp.path().join("target"));

        match result {
            Err(CourseExportError::MalformedArchive(message)) => {
                assert!(message.contains("published branch"))
            }
            other => panic!("expected MalformedArchive, got {:?}", other),
        }
    }

    #[test]
    fn test_two_top_level_entries_fail() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        create_v0_archive(&source, false);
        fs::create_dir_all(source.join("second")).unwrap();

        let result = FormatConverter::new().convert(&source, &temp.path().join("target"));
        assert!(matches!(result, Err(CourseExportError::MalformedArchive(_))));
    }

    #[test]
    fn test_single_file_fails() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        write(&source.join("course.tar.gz"), "not a dir");

        let result = FormatConverter::new().convert(&source, &temp.path().join("target"));
        assert!(matches!(result, Err(CourseExportError::MalformedArchive(_))));
    }

    #[test]
    fn test_unknown_version_fails() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        write(&source.join("circuits/format.json"), r#"{"export_format": 2}"#);

        let result = FormatConverter::new().convert(&source, &temp.path().join("target"));
        assert!(matches!(result, Err(CourseExportError::UnknownVersion(2))));
    }

    #[test]
    fn test_existing_destination() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let target = temp.path().join("target");
        create_v0_archive(&source, false);
        write(&target.join("circuits/stale.txt"), "old");

        let result = FormatConverter::new().convert(&source, &target);
        assert!(matches!(result, Err(CourseExportError::DestinationExists(_))));

        let converter = FormatConverter::new().with_config(ConvertConfig { overwrite: true });
        assert_eq!(converter.convert(&source, &target).unwrap(), ArchiveVersion::V1);
        assert!(!target.join("circuits/stale.txt").exists());
    }

    #[test]
    fn test_target_equal_to_source_is_rejected() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        create_v0_archive(&source, true);

        let converter = FormatConverter::new().with_config(ConvertConfig { overwrite: true });
        let result = converter.convert(&source, &source);

        assert!(matches!(result, Err(CourseExportError::MalformedArchive(_))));
        assert_eq!(read(&source.join("circuits/course.xml")), r#"<course url_name="2012_Fall"/>"#);
        assert!(source.join("circuits/drafts/vertical/v1.xml").is_file());
    }

    #[test]
    fn test_target_inside_source_is_rejected() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        create_v0_archive(&source, false);
        let nested = source.join("circuits/converted");

        let result = FormatConverter::new().convert(&source, &nested);

        assert!(matches!(result, Err(CourseExportError::MalformedArchive(_))));
        assert!(!nested.exists());
    }

    #[test]
    fn test_resolve_path_of_missing_tail() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();

        let resolved = resolve_path(&temp.path().join("a/b")).unwrap();
        assert_eq!(resolved, base.join("a").join("b"));
    }
}
