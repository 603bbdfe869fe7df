//! Course-run policy documents

use crate::archive::{write_file, GRADING_POLICY_FILE, POLICIES_DIR, POLICY_FILE};
use crate::error::Result;
use crate::value::{encode_map, to_json_string, Metadata};
use std::path::{Path, PathBuf};

/// Writes `policy.json` and `grading_policy.json` for a course run
pub struct PolicyWriter;

impl PolicyWriter {
    /// Key of the course entry in `policy.json`
    pub fn policy_key(run_name: &str) -> String {
        format!("course/{}", run_name)
    }

    /// Directory holding a run's policy files
    pub fn run_dir(destination: &Path, run_name: &str) -> PathBuf {
        destination.join(POLICIES_DIR).join(run_name)
    }

    /// Write both policy documents under `<destination>/policies/<run_name>/`
    pub fn write(
        destination: &Path,
        run_name: &str,
        metadata: &Metadata,
        grading_policy: &serde_json::Value,
    ) -> Result<()> {
        let run_dir = Self::run_dir(destination, run_name);

        write_file(
            &run_dir.join(GRADING_POLICY_FILE),
            to_json_string(grading_policy)?.as_bytes(),
        )?;

        let mut record = serde_json::Map::new();
        record.insert(
            Self::policy_key(run_name),
            serde_json::Value::Object(encode_map(metadata)?),
        );
        write_file(&run_dir.join(POLICY_FILE), to_json_string(&record)?.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CourseExportError;
    use crate::value::MetadataValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_write_policies() {
        let temp = TempDir::new().unwrap();
        let mut metadata = Metadata::new();
        metadata.insert("display_name".to_string(), "Course".into());

        PolicyWriter::write(temp.path(), "2024", &metadata, &json!({"GRADER": []})).unwrap();

        let run_dir = temp.path().join("policies/2024");
        assert_eq!(
            read_json(&run_dir.join("policy.json")),
            json!({"course/2024": {"display_name": "Course"}})
        );
        assert_eq!(
            fs::read_to_string(run_dir.join("grading_policy.json")).unwrap(),
            r#"{"GRADER":[]}"#
        );
    }

    #[test]
    fn test_policy_encodes_special_values() {
        let temp = TempDir::new().unwrap();
        let start = chrono::NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut metadata = Metadata::new();
        metadata.insert(
            "start".to_string(),
            MetadataValue::Timestamp(crate::value::Timestamp::Utc(start)),
        );

        PolicyWriter::write(temp.path(), "fall", &metadata, &json!({})).unwrap();

        assert_eq!(
            read_json(&temp.path().join("policies/fall/policy.json")),
            json!({"course/fall": {"start": "2024-09-01T00:00:00Z"}})
        );
    }

    #[test]
    fn test_unsupported_value_aborts() {
        let temp = TempDir::new().unwrap();
        let mut metadata = Metadata::new();
        metadata.insert("weight".to_string(), MetadataValue::Float(f64::INFINITY));

        let result = PolicyWriter::write(temp.path(), "fall", &metadata, &json!({}));
        assert!(matches!(result, Err(CourseExportError::UnsupportedValue(_))));
    }

    #[test]
    fn test_policy_key() {
        assert_eq!(PolicyWriter::policy_key("2012_Fall"), "course/2012_Fall");
    }
}
