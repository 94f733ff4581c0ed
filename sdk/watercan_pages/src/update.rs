//! Usage update handler of the admin page.

use watercan_core::client::WaterCanClient;
use watercan_core::error::WaterCanResult;
use watercan_core::models::ApiOutcome;
use watercan_usage::usage::{self, UpdateRequest};

use crate::render::Rendered;

/// Shown when the ID is blank or the count field is empty.
pub const MISSING_INPUT_MESSAGE: &str = "Please enter both ID and count.";

/// Shown when the backend accepted the update.
pub const UPDATED_MESSAGE: &str = "Usage updated successfully!";

/// Shown when the backend refused the update without saying why.
pub const FAILED_MESSAGE: &str = "Failed to update.";

/// Shown when no readable answer came back.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error updating usage.";

/// Submit a new count for the can named by `raw_id` and render the outcome.
///
/// The ID is trimmed; the count is sent exactly as typed. Only the empty
/// string counts as a missing count, so `"0"` is submitted.
pub async fn submit_update(client: &WaterCanClient, raw_id: &str, raw_count: &str) -> Rendered {
    let can_id = raw_id.trim();
    if can_id.is_empty() || raw_count.is_empty() {
        tracing::debug!("update skipped: missing id or count");
        return Rendered::bad(MISSING_INPUT_MESSAGE);
    }

    let request = match UpdateRequest::builder().can_id(can_id).count(raw_count).build() {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "update skipped");
            return Rendered::bad(MISSING_INPUT_MESSAGE);
        }
    };

    render_update(usage::update_usage(client, &request).await)
}

/// Fold an update result into what the page shows.
///
/// A refusal shows the backend's `msg` when it is non-empty, otherwise
/// [`FAILED_MESSAGE`].
pub fn render_update(result: WaterCanResult<ApiOutcome<()>>) -> Rendered {
    match result {
        Ok(ApiOutcome::Success(())) => Rendered::good(UPDATED_MESSAGE),
        Ok(ApiOutcome::Failure { message, .. }) => {
            let message = message.filter(|msg| !msg.is_empty());
            Rendered::bad(message.unwrap_or_else(|| FAILED_MESSAGE.to_string()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "update failed");
            Rendered::bad(TRANSPORT_ERROR_MESSAGE)
        }
    }
}
