//! Read access to the backend's update ledger.
//!
//! Every accepted update is appended by the backend to a hash-chained log.
//! The public listing strips the hash fields, so the client can show the
//! history and ask the backend to verify the chain, but cannot check the
//! hashes itself.

use serde::Deserialize;
use watercan_core::client::WaterCanClient;
use watercan_core::error::WaterCanResult;

/// Path of the ledger listing endpoint.
pub const GET_LOGS_PATH: &str = "/api/get_logs";

/// Path of the ledger verification endpoint.
pub const VERIFY_PATH: &str = "/api/verify_blockchain";

/// One accepted update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerEntry {
    /// Backend-local ISO-8601 timestamp, without offset.
    pub timestamp: String,
    pub can_id: String,
    pub old_count: u64,
    pub new_count: u64,
    /// Name of the admin who made the change.
    pub admin: String,
}

impl LedgerEntry {
    /// Change applied by this entry.
    pub fn delta(&self) -> i128 {
        i128::from(self.new_count) - i128::from(self.old_count)
    }
}

/// Result of asking the backend to walk its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LedgerVerification {
    pub verified: bool,

    /// Number of blocks checked on success, or index of the first bad block.
    pub checked_blocks: u64,
}

/// List every ledger entry, oldest first.
///
/// # Tracing
///
/// Emits a span named `watercan::ledger::list`.
#[tracing::instrument(name = "watercan::ledger::list", skip(client))]
pub async fn list(client: &WaterCanClient) -> WaterCanResult<Vec<LedgerEntry>> {
    tracing::debug!("listing ledger");

    let response = client.get(GET_LOGS_PATH).await?;
    let body = response.text().await?;
    let entries: Vec<LedgerEntry> = serde_json::from_str(&body)?;

    tracing::debug!(count = entries.len(), "ledger listed");
    Ok(entries)
}

/// List the ledger entries of a single Water Can, oldest first.
///
/// # Tracing
///
/// Emits a span named `watercan::ledger::history` with field `can_id`.
#[tracing::instrument(name = "watercan::ledger::history", skip(client), fields(can_id = %can_id))]
pub async fn history(client: &WaterCanClient, can_id: &str) -> WaterCanResult<Vec<LedgerEntry>> {
    let entries = list(client).await?;
    Ok(entries.into_iter().filter(|e| e.can_id == can_id).collect())
}

/// Ask the backend to verify the ledger chain.
///
/// # Tracing
///
/// Emits a span named `watercan::ledger::verify`.
#[tracing::instrument(name = "watercan::ledger::verify", skip(client))]
pub async fn verify(client: &WaterCanClient) -> WaterCanResult<LedgerVerification> {
    let response = client.get(VERIFY_PATH).await?;
    let body = response.text().await?;
    let result: LedgerVerification = serde_json::from_str(&body)?;

    if !result.verified {
        tracing::warn!(at = result.checked_blocks, "ledger verification failed");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use watercan_core::error::WaterCanError;
    use watercan_core::test_support::setup_mock_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_logs() -> serde_json::Value {
        serde_json::json!([
            {
                "timestamp": "2025-03-01T09:15:02.118211",
                "can_id": "WC-1",
                "old_count": 0,
                "new_count": 3,
                "admin": "admin"
            },
            {
                "timestamp": "2025-03-02T10:00:00.000001",
                "can_id": "WC-2",
                "old_count": 10,
                "new_count": 11,
                "admin": "admin"
            },
            {
                "timestamp": "2025-03-03T18:42:51.500000",
                "can_id": "WC-1",
                "old_count": 3,
                "new_count": 8,
                "admin": "admin"
            }
        ])
    }

    #[test]
    fn entry_delta() {
        let entry: LedgerEntry = serde_json::from_value(sample_logs()[2].clone()).unwrap();
        assert_eq!(entry.delta(), 5);
    }

    #[test]
    fn entry_ignores_hash_fields() {
        let entry: LedgerEntry = serde_json::from_value(serde_json::json!({
            "timestamp": "2025-03-01T09:15:02",
            "can_id": "WC-1",
            "old_count": 0,
            "new_count": 1,
            "admin": "admin",
            "prev_hash": "0000",
            "hash": "abcd"
        }))
        .unwrap();

        assert_eq!(entry.new_count, 1);
    }

    #[tokio::test]
    async fn list_returns_entries_in_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(GET_LOGS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_logs()))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);
        let entries = list(&client).await.expect("should succeed");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].can_id, "WC-1");
        assert_eq!(entries[1].old_count, 10);
    }

    #[tokio::test]
    async fn list_empty_ledger() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(GET_LOGS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);
        assert!(list(&client).await.expect("should succeed").is_empty());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn history_filters_by_can() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(GET_LOGS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_logs()))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);
        let entries = history(&client, "WC-1").await.expect("should succeed");

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.can_id == "WC-1"));
        assert_eq!(entries[1].new_count, 8);
        assert!(logs_contain("watercan::ledger::history"));
    }

    #[tokio::test]
    async fn verify_reports_valid_chain() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(VERIFY_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"verified": true, "checked_blocks": 3})),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);
        let result = verify(&client).await.expect("should succeed");

        assert_eq!(
            result,
            LedgerVerification {
                verified: true,
                checked_blocks: 3
            }
        );
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn verify_warns_on_broken_chain() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(VERIFY_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"verified": false, "checked_blocks": 1})),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);
        let result = verify(&client).await.expect("should succeed");

        assert!(!result.verified);
        assert!(logs_contain("ledger verification failed"));
    }

    #[tokio::test]
    async fn list_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(GET_LOGS_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);
        let err = list(&client).await.unwrap_err();

        assert!(matches!(err, WaterCanError::Http { status: 500, .. }));
    }
}
