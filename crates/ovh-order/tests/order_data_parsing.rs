//! Integration tests for parsing Order API data.

use ovh_core::identifier::PUBLIC_CLOUD_PROJECT_ID;
use ovh_order::models::{Order, OrderDetail, OrderDetailOperation, OrderState};
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_order() {
    let order: Order = serde_json::from_str(&load_fixture("order.json")).unwrap();
    assert_eq!(order.order_id, 1234);
    assert!(order.date.is_some());
    assert!(order.pdf_url.as_deref().unwrap().contains("format=pdf"));
    assert!(order.prices.is_some());
}

#[test]
fn test_deserialize_placeholder_detail() {
    let detail: OrderDetail = serde_json::from_str(&load_fixture("order_detail.json")).unwrap();
    assert_eq!(detail.order_detail_id, 99);
    assert_eq!(detail.domain, "*");
    assert!(!PUBLIC_CLOUD_PROJECT_ID.matches(&detail.domain));
}

#[test]
fn test_operations_name_the_project() {
    let operations: Vec<OrderDetailOperation> =
        serde_json::from_str(&load_fixture("order_detail_operations.json")).unwrap();
    assert_eq!(operations.len(), 2);

    let project = operations
        .iter()
        .find(|operation| PUBLIC_CLOUD_PROJECT_ID.matches(&operation.resource.name))
        .expect("fixture holds a project operation");
    assert_eq!(project.id, 501235);
    assert_eq!(
        project.resource.resource_type.as_deref(),
        Some("publicCloudProject")
    );
}

#[test]
fn test_order_state_attribute_from_fixtures() {
    let order: Order = serde_json::from_str(&load_fixture("order.json")).unwrap();
    let detail: OrderDetail = serde_json::from_str(&load_fixture("order_detail.json")).unwrap();

    let attribute = OrderState::new(&order, &[detail]).to_attribute();
    let block = &attribute[0];
    assert_eq!(block["order_id"], 1234);
    assert_eq!(block["details"][0]["order_detail_id"], 99);
    assert_eq!(block["details"][0]["description"], "Public Cloud Project");
}
