//! Usage lookup and update calls.
//!
//! Both endpoints take a JSON body keyed by `can_id`. The lookup answers with
//! the current count and a status label; the update answers with a `success`
//! flag in the body, whatever HTTP status accompanies it.
//!
//! # Example
//!
//! ```rust,no_run
//! # use watercan_core::client::WaterCanClient;
//! # use watercan_core::models::ApiOutcome;
//! # use watercan_usage::usage::{self, UpdateRequest};
//! # async fn example(client: &WaterCanClient) -> watercan_core::error::WaterCanResult<()> {
//! if let ApiOutcome::Success(record) = usage::get_usage(client, "WC-1001").await? {
//!     println!("{} has been used {} times ({})", record.can_id, record.count, record.status);
//! }
//!
//! let request = UpdateRequest::builder()
//!     .can_id("WC-1001")
//!     .count(12_u64)
//!     .build()?;
//! let outcome = usage::update_usage(client, &request).await?;
//! println!("updated: {}", outcome.is_success());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use watercan_core::client::WaterCanClient;
use watercan_core::error::{WaterCanError, WaterCanResult};
use watercan_core::models::ApiOutcome;

/// Path of the lookup endpoint.
pub const GET_USAGE_PATH: &str = "/api/get_usage";

/// Path of the update endpoint.
pub const UPDATE_USAGE_PATH: &str = "/api/update_usage";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of a lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageQuery {
    pub can_id: String,
}

/// A count as submitted to the update endpoint.
///
/// The backend converts whatever it receives with `int(...)`, so the raw text
/// of an input field can be sent unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UsageCount {
    Number(u64),
    Text(String),
}

impl UsageCount {
    /// `true` only for the empty string. `"0"` and `0` are both present.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl From<u64> for UsageCount {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UsageCount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for UsageCount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Body of an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    pub can_id: String,
    pub count: UsageCount,
}

impl UpdateRequest {
    /// Create a new builder.
    pub fn builder() -> UpdateRequestBuilder {
        UpdateRequestBuilder::default()
    }
}

/// Builder for [`UpdateRequest`].
#[derive(Debug, Default)]
pub struct UpdateRequestBuilder {
    can_id: Option<String>,
    count: Option<UsageCount>,
}

impl UpdateRequestBuilder {
    /// Set the Water Can ID to update.
    pub fn can_id(mut self, can_id: impl Into<String>) -> Self {
        self.can_id = Some(can_id.into());
        self
    }

    /// Set the new count. Accepts numbers or the raw text of an input field.
    pub fn count(mut self, count: impl Into<UsageCount>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Build the request, returning an error if a field is missing or empty.
    pub fn build(self) -> WaterCanResult<UpdateRequest> {
        let can_id = self
            .can_id
            .ok_or_else(|| WaterCanError::Builder("can_id is required".into()))?;

        if can_id.trim().is_empty() {
            return Err(WaterCanError::Builder("can_id cannot be empty".into()));
        }

        let count = self
            .count
            .ok_or_else(|| WaterCanError::Builder("count is required".into()))?;

        if count.is_empty() {
            return Err(WaterCanError::Builder("count cannot be empty".into()));
        }

        Ok(UpdateRequest { can_id, count })
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Backend-assigned usage label, e.g. `Good` or `Bad`.
///
/// The vocabulary belongs to the backend; the client only lower-cases it to
/// pick a CSS class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageStatus(String);

impl UsageStatus {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSS class used to style the label.
    pub fn css_class(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A usage record as answered by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsageRecord {
    /// The queried ID. Not part of the response body; filled in by [`get_usage`].
    #[serde(skip_deserializing)]
    pub can_id: String,

    /// Number of times the can has been used.
    pub count: u64,

    /// Usage label.
    pub status: UsageStatus,
}

/// Body of an update response.
///
/// A body without a `success` flag is a refusal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub msg: Option<String>,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Look up the usage record of a Water Can.
///
/// A non-success status becomes [`ApiOutcome::Failure`], carrying the `msg`
/// field of the body when the body had one.
///
/// # Errors
///
/// Returns an error on transport failure, or if a success response cannot be
/// decoded as a usage record.
///
/// # Tracing
///
/// Emits a span named `watercan::usage::get` with field `can_id`.
#[tracing::instrument(name = "watercan::usage::get", skip(client), fields(can_id = %can_id))]
pub async fn get_usage(
    client: &WaterCanClient,
    can_id: &str,
) -> WaterCanResult<ApiOutcome<UsageRecord>> {
    tracing::debug!("looking up usage");

    let query = UsageQuery {
        can_id: can_id.to_string(),
    };

    let response = match client.post(GET_USAGE_PATH, &query).await {
        Ok(response) => response,
        Err(WaterCanError::Api { status, message }) => {
            tracing::debug!(status, "lookup refused");
            return Ok(ApiOutcome::Failure {
                status,
                message: Some(message),
            });
        }
        Err(WaterCanError::Http { status, .. }) => {
            tracing::debug!(status, "lookup refused without message");
            return Ok(ApiOutcome::Failure {
                status,
                message: None,
            });
        }
        Err(e) => return Err(e),
    };

    let body = response.text().await?;
    let mut record: UsageRecord = serde_json::from_str(&body)?;
    record.can_id = query.can_id;

    tracing::debug!(count = record.count, status = %record.status, "usage found");
    Ok(ApiOutcome::Success(record))
}

/// Set the usage count of a Water Can.
///
/// The outcome is read from the `success` flag of the body. The backend
/// answers refusals with 400 or 401 alongside `{"success": false, "msg": ...}`,
/// so the status code alone is not used to decide. A missing flag counts as a
/// refusal, and an empty `msg` counts as no message.
///
/// # Errors
///
/// Returns an error on transport failure or if the body is not an update
/// response.
///
/// # Tracing
///
/// Emits a span named `watercan::usage::update` with field `can_id`.
#[tracing::instrument(
    name = "watercan::usage::update",
    skip(client, request),
    fields(can_id = %request.can_id)
)]
pub async fn update_usage(
    client: &WaterCanClient,
    request: &UpdateRequest,
) -> WaterCanResult<ApiOutcome<()>> {
    tracing::debug!("updating usage");

    let response = client.post_unchecked(UPDATE_USAGE_PATH, request).await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    let parsed: UpdateResponse = serde_json::from_str(&body)?;

    if parsed.success {
        tracing::debug!("usage updated");
        Ok(ApiOutcome::Success(()))
    } else {
        tracing::debug!(status, msg = ?parsed.msg, "update refused");
        Ok(ApiOutcome::Failure {
            status,
            message: parsed.msg.filter(|msg| !msg.is_empty()),
        })
    }
}
