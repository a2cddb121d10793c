use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_migrate_maps_legacy_statuses() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("legacy.json");
    fs::write(
        &input,
        r#"[
  {
    "id": "5",
    "projectName": "Analytics",
    "repositoryUrl": "https://github.com/team/data-analytics",
    "description": "d",
    "purpose": "p",
    "expectedDuration": "12",
    "teamSize": "15",
    "status": "denied",
    "lastUpdated": "2024-03-01",
    "createdAt": "2024-02-15",
    "denyReason": "not enough capacity"
  }
]"#,
    )
    .unwrap();

    let output = cargo_bin_cmd!("rdash")
        .env("RDASH_HOME", dir.path())
        .arg("migrate")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let projects: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(projects[0]["status"], "denied");
    assert_eq!(projects[0]["team_size"], 15);
    assert_eq!(projects[0]["reject_reason"], "not enough capacity");
}

#[test]
fn test_migrate_missing_file_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("rdash")
        .env("RDASH_HOME", dir.path())
        .args(["migrate", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}
