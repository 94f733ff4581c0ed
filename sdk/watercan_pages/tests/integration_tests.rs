//! Integration tests for watercan_pages.
//!
//! These tests require a running Water Can backend.
//! Run with: `cargo test --features integration-tests`
//!
//! Required environment variables:
//! - `WATERCAN_ENDPOINT`: base URL of the backend
//! - `WATERCAN_TEST_CAN_ID`: an ID the backend knows about

#![cfg(feature = "integration-tests")]

use watercan_core::client::WaterCanClient;
use watercan_pages::lookup::MISSING_ID_MESSAGE;
use watercan_pages::{FieldId, Key, Page, RegionId, Rendered};

fn get_client() -> WaterCanClient {
    WaterCanClient::builder()
        .build()
        .expect("WATERCAN_ENDPOINT not set or invalid")
}

fn get_can_id() -> String {
    std::env::var("WATERCAN_TEST_CAN_ID").expect("WATERCAN_TEST_CAN_ID not set")
}

#[tokio::test]
async fn test_lookup_known_can() {
    let mut page = Page::user(get_client());
    page.attach_handlers();
    page.set_value(FieldId::CanId, get_can_id());

    page.key_press(FieldId::CanId, Key::Enter).await;

    match page.rendered(RegionId::Result) {
        Some(Rendered::Usage { status, .. }) => assert!(!status.as_str().is_empty()),
        other => panic!("Expected usage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_unknown_can_shows_error() {
    let mut page = Page::user(get_client());
    page.attach_handlers();
    page.set_value(FieldId::CanId, "does-not-exist-7f3a");

    page.key_press(FieldId::CanId, Key::Enter).await;

    let rendered = page.rendered(RegionId::Result).expect("region written");
    assert!(rendered.is_error());
}

#[tokio::test]
async fn test_blank_lookup_is_local() {
    let mut page = Page::user(get_client());
    page.attach_handlers();
    page.set_value(FieldId::CanId, "   ");

    page.key_press(FieldId::CanId, Key::Enter).await;

    assert_eq!(
        page.rendered(RegionId::Result),
        Some(&Rendered::bad(MISSING_ID_MESSAGE))
    );
}

#[tokio::test]
async fn test_update_without_session_is_refused() {
    let mut page = Page::admin(get_client());
    page.attach_handlers();
    page.set_value(FieldId::AdminCanId, get_can_id());
    page.set_value(FieldId::AdminCount, "1");

    page.key_press(FieldId::AdminCount, Key::Enter).await;

    let rendered = page.rendered(RegionId::AdminResult).expect("region written");
    assert!(rendered.is_error());
}
