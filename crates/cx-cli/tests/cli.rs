//! End-to-end tests for the coursex binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "course": "i4x://MITx/6.002x/course/2012_Fall",
    "nodes": [
        {
            "address": "i4x://MITx/6.002x/course/2012_Fall",
            "children": ["i4x://MITx/6.002x/chapter/week1"],
            "metadata": {"display_name": "Circuits"},
            "grading_policy": {"GRADER": []}
        },
        {
            "address": "i4x://MITx/6.002x/chapter/week1",
            "children": ["i4x://MITx/6.002x/sequential/s1"]
        },
        {
            "address": "i4x://MITx/6.002x/sequential/s1",
            "children": ["i4x://MITx/6.002x/vertical/v1"]
        },
        {"address": "i4x://MITx/6.002x/vertical/v1"},
        {"address": "i4x://MITx/6.002x/static_tab/syllabus", "data": "<p>Syllabus</p>"}
    ],
    "drafts": [
        {"address": "i4x://MITx/6.002x/vertical/v1"},
        {"address": "i4x://MITx/6.002x/vertical/orphan"}
    ]
}"#;

fn coursex() -> Command {
    Command::cargo_bin("coursex").unwrap()
}

fn export_course(temp: &TempDir) -> std::path::PathBuf {
    let snapshot = temp.path().join("course.json");
    fs::write(&snapshot, SNAPSHOT).unwrap();
    let output = temp.path().join("export");

    coursex()
        .arg("export")
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("--output")
        .arg(&output)
        .arg("--course-dir")
        .arg("circuits")
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported to"));

    output
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_export_writes_archive() {
    let temp = TempDir::new().unwrap();
    let output = export_course(&temp);
    let root = output.join("circuits");

    assert!(root.join("course.xml").is_file());
    assert!(root.join("tabs/syllabus.html").is_file());
    assert!(root.join("drafts/vertical/v1.xml").is_file());
    assert!(!root.join("drafts/vertical/orphan.xml").exists());
    assert_eq!(
        read_json(&root.join("policies/2012_Fall/policy.json")),
        serde_json::json!({"course/2012_Fall": {"display_name": "Circuits"}})
    );
}

#[test]
fn test_detect_and_convert() {
    let temp = TempDir::new().unwrap();
    let output = export_course(&temp);

    coursex()
        .arg("detect")
        .arg(output.join("circuits"))
        .assert()
        .success()
        .stdout("0\n");

    let converted = temp.path().join("v1");
    coursex()
        .arg("convert")
        .arg(&output)
        .arg(&converted)
        .assert()
        .success();

    coursex()
        .arg("detect")
        .arg(converted.join("circuits"))
        .assert()
        .success()
        .stdout("1\n");

    assert!(converted.join("circuits/published/course.xml").is_file());
    assert!(converted.join("circuits/drafts/vertical/v1.xml").is_file());
    assert!(!converted.join("circuits/published/drafts").exists());
}

#[test]
fn test_convert_rejects_multiple_courses() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    fs::create_dir_all(source.join("a")).unwrap();
    fs::create_dir_all(source.join("b")).unwrap();

    coursex()
        .arg("convert")
        .arg(&source)
        .arg(temp.path().join("target"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("single course directory"));
}

#[test]
fn test_export_missing_snapshot() {
    let temp = TempDir::new().unwrap();

    coursex()
        .arg("export")
        .arg("--snapshot")
        .arg(temp.path().join("missing.json"))
        .arg("--output")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load snapshot"));
}

#[test]
fn test_convert_overwrite() {
    let temp = TempDir::new().unwrap();
    let output = export_course(&temp);
    let converted = temp.path().join("v1");
    fs::create_dir_all(converted.join("circuits")).unwrap();
    fs::write(converted.join("circuits/stale.txt"), "old").unwrap();

    coursex()
        .arg("convert")
        .arg(&output)
        .arg(&converted)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    coursex()
        .arg("convert")
        .arg(&output)
        .arg(&converted)
        .arg("--overwrite")
        .assert()
        .success();

    assert!(!converted.join("circuits/stale.txt").exists());
    assert!(converted.join("circuits/published/course.xml").is_file());
}

#[test]
fn test_config_init_and_show() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("coursex.toml");

    coursex()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .arg("init")
        .assert()
        .success();
    assert!(config.is_file());

    coursex()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .arg("show")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"include_drafts\": true"));

    fs::write(&config, "[convert]\noverwrite = true\n").unwrap();
    coursex()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("overwrite = true"));
}
