//! Integration tests for parsing Public Cloud project data.

use ovh_cloud::models::CloudProject;
use ovh_core::identifier::PUBLIC_CLOUD_PROJECT_ID;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load the project fixture from disk.
fn load_project_fixture() -> String {
    let fixture_path = fixtures_dir().join("cloud_project.json");
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read project fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_project() {
    let json_data = load_project_fixture();
    let project: CloudProject = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize project data: {}\nJSON: {}",
            e, json_data
        )
    });

    assert!(PUBLIC_CLOUD_PROJECT_ID.matches(&project.project_id));
    assert_eq!(project.status, "ok");
    assert_eq!(project.order_id, Some(1234));
    assert!(project.creation_date.is_some());
    assert!(project.expiration.is_none());
}

#[test]
fn test_project_iam_metadata() {
    let project: CloudProject = serde_json::from_str(&load_project_fixture()).unwrap();

    let iam = project.iam.as_ref().expect("fixture has IAM metadata");
    assert_eq!(iam.display_name.as_deref(), Some("terraform managed"));
    assert_eq!(
        project.urn(),
        Some("urn:v1:eu:resource:publicCloudProject:aabbccddeeff40000000000000000000")
    );
}
