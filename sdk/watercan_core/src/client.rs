//! HTTP client for the Water Can usage API.
//!
//! This module provides [`WaterCanClient`], the entry point used by the
//! higher-level crates. The client owns the HTTP transport and the base
//! endpoint; it adds no authentication and performs no retries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use watercan_core::client::WaterCanClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WaterCanClient::builder()
//!     .endpoint("http://127.0.0.1:5000")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Endpoint from the environment
//!
//! When no endpoint is passed to the builder, [`ENDPOINT_ENV_VAR`] is read.
//!
//! ```rust,no_run
//! use watercan_core::client::WaterCanClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // WATERCAN_ENDPOINT=http://watercans.local:7000
//! let client = WaterCanClient::builder().build()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{WaterCanError, WaterCanResult};
use crate::models::ApiMessage;
use reqwest::Client as HttpClient;
use url::Url;

use std::time::Duration;

/// Environment variable consulted when the builder has no endpoint.
pub const ENDPOINT_ENV_VAR: &str = "WATERCAN_ENDPOINT";

/// The client for the Water Can usage API.
///
/// The client is cheaply cloneable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct WaterCanClient {
    pub(crate) http: HttpClient,
    pub(crate) endpoint: Url,
}

/// Builder for constructing a [`WaterCanClient`].
///
/// Use [`WaterCanClient::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct WaterCanClientBuilder {
    endpoint: Option<String>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl WaterCanClient {
    /// Create a new builder for configuring a `WaterCanClient`.
    pub fn builder() -> WaterCanClientBuilder {
        WaterCanClientBuilder::default()
    }

    /// Get the base endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a full URL for an API path.
    ///
    /// The path is resolved below the endpoint, so an endpoint with a path
    /// prefix such as `http://host/watercan` keeps its prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined to the endpoint URL.
    pub fn url(&self, path: &str) -> WaterCanResult<Url> {
        self.endpoint
            .join(path.trim_start_matches('/'))
            .map_err(|e| WaterCanError::invalid_endpoint_with_source("failed to construct URL", e))
    }

    /// Send a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level or the
    /// server answers with a non-success status.
    pub async fn get(&self, path: &str) -> WaterCanResult<reqwest::Response> {
        let url = self.url(path)?;
        tracing::debug!(%url, "sending GET");

        let response = self.http.get(url).send().await?;
        Self::check_response(response).await
    }

    /// Send a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level or the
    /// server answers with a non-success status. A `msg` field in the error
    /// body is surfaced as [`WaterCanError::Api`].
    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> WaterCanResult<reqwest::Response> {
        let response = self.post_unchecked(path, body).await?;
        Self::check_response(response).await
    }

    /// Send a POST request with a JSON body without inspecting the status.
    ///
    /// Unlike [`Self::post`], the response is handed back as-is so endpoints
    /// that report their outcome in the body (whatever the status code) can be
    /// decoded by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error only if the request fails at the transport level.
    pub async fn post_unchecked<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> WaterCanResult<reqwest::Response> {
        let url = self.url(path)?;
        tracing::debug!(%url, "sending POST");

        let response = self.http.post(url).json(body).send().await?;
        tracing::debug!(status = response.status().as_u16(), "response received");
        Ok(response)
    }

    /// Maximum length for error messages copied out of response bodies.
    const MAX_ERROR_MESSAGE_LEN: usize = 1000;

    /// Truncate a message if it exceeds the maximum length.
    pub(crate) fn truncate_message(msg: &str) -> String {
        if msg.len() <= Self::MAX_ERROR_MESSAGE_LEN {
            return msg.to_string();
        }

        let mut cut = Self::MAX_ERROR_MESSAGE_LEN;
        while !msg.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... (truncated)", &msg[..cut])
    }

    /// Check the response status and return an error if not successful.
    async fn check_response(response: reqwest::Response) -> WaterCanResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if let Ok(ApiMessage { msg: Some(message) }) = serde_json::from_str::<ApiMessage>(&body) {
            if message.is_empty() {
                return Err(WaterCanError::http(status, Self::truncate_message(&body)));
            }
            return Err(WaterCanError::Api {
                status,
                message: Self::truncate_message(&message),
            });
        }

        Err(WaterCanError::http(status, Self::truncate_message(&body)))
    }
}

impl WaterCanClientBuilder {
    /// Set the backend endpoint URL, e.g. `http://127.0.0.1:5000`.
    ///
    /// If not set, the builder will check the `WATERCAN_ENDPOINT`
    /// environment variable.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a custom HTTP client.
    ///
    /// Use this to configure proxies, cookie stores, or other HTTP settings.
    ///
    /// **Note:** If you provide a custom HTTP client, any timeout configuration
    /// via [`connect_timeout`](Self::connect_timeout) or
    /// [`read_timeout`](Self::read_timeout) will be ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout. Unset by default.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout, covering the whole request/response cycle.
    /// Unset by default.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Build the `WaterCanClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint is provided and `WATERCAN_ENDPOINT` is not set
    /// - The endpoint URL is invalid
    /// - The HTTP client cannot be constructed
    pub fn build(self) -> WaterCanResult<WaterCanClient> {
        let http = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                if let Some(timeout) = self.read_timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        let endpoint_str = self
            .endpoint
            .or_else(|| std::env::var(ENDPOINT_ENV_VAR).ok())
            .ok_or_else(|| {
                WaterCanError::MissingConfig(format!(
                    "endpoint is required. Set it via builder or {ENDPOINT_ENV_VAR} env var."
                ))
            })?;

        let mut endpoint = Url::parse(&endpoint_str)
            .map_err(|e| WaterCanError::invalid_endpoint_with_source("invalid endpoint URL", e))?;

        // Joining replaces the last path segment unless the path ends in '/'.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(WaterCanClient { http, endpoint })
    }
}
