//! Usage lookup handler of the user page.

use watercan_core::client::WaterCanClient;
use watercan_core::error::WaterCanResult;
use watercan_core::models::ApiOutcome;
use watercan_usage::usage::{self, UsageRecord};

use crate::render::Rendered;

/// Shown when the ID field is empty or whitespace.
pub const MISSING_ID_MESSAGE: &str = "Please enter a Water Can ID.";

/// Shown when a lookup fails without a message from the backend.
pub const NOT_FOUND_MESSAGE: &str = "Water Can not found.";

/// Look up the usage of the can named by `raw_id` and render the result.
///
/// The ID is trimmed first; an empty ID renders a validation message without
/// any request being sent.
pub async fn check_usage(client: &WaterCanClient, raw_id: &str) -> Rendered {
    let can_id = raw_id.trim();
    if can_id.is_empty() {
        tracing::debug!("lookup skipped: no can id");
        return Rendered::bad(MISSING_ID_MESSAGE);
    }

    render_lookup(usage::get_usage(client, can_id).await)
}

/// Fold a lookup result into what the page shows.
///
/// Every kind of failure ends as a `bad` message: the backend's `msg` when it
/// sent a non-empty one, otherwise [`NOT_FOUND_MESSAGE`].
pub fn render_lookup(result: WaterCanResult<ApiOutcome<UsageRecord>>) -> Rendered {
    match result {
        Ok(ApiOutcome::Success(record)) => Rendered::Usage {
            count: record.count,
            status: record.status,
        },
        Ok(ApiOutcome::Failure { message, .. }) => {
            let message = message.filter(|msg| !msg.is_empty());
            Rendered::bad(message.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "lookup failed");
            Rendered::bad(NOT_FOUND_MESSAGE)
        }
    }
}
