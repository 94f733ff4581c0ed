//! Helpers for testing crates built on top of `watercan_core`.
//!
//! Enabled by the `test-support` feature.

use crate::client::WaterCanClient;
use wiremock::MockServer;

/// Create a client pointed at a mock server.
///
/// # Panics
///
/// Panics if the mock server URI cannot be parsed, which wiremock never produces.
pub fn setup_mock_client(server: &MockServer) -> WaterCanClient {
    WaterCanClient::builder()
        .endpoint(server.uri())
        .build()
        .expect("mock server URI should be a valid endpoint")
}
