//! Common types shared across all Water Can crates.

use serde::{Deserialize, Serialize};

/// Message body the backend attaches to failed requests.
///
/// Every field is optional: a 404 from the lookup endpoint carries only
/// `{"status": "not_found"}`, and some proxies answer with an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Outcome of an API call that reached the backend.
///
/// Transport failures stay in [`WaterCanResult`](crate::error::WaterCanResult);
/// this type only separates a usable payload from an application-level refusal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The backend accepted the request.
    Success(T),

    /// The backend refused the request, optionally explaining why.
    Failure {
        /// HTTP status of the response.
        status: u16,
        /// `msg` field from the response body, when one was present.
        message: Option<String>,
    },
}

impl<T> ApiOutcome<T> {
    /// Returns `true` for [`ApiOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure message, if this is a failure that carried one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message, .. } => message.as_deref(),
        }
    }
}
