use thiserror::Error;

/// Errors that can occur when talking to the Water Can usage API.
#[derive(Error, Debug)]
pub enum WaterCanError {
    /// The server answered with a non-success status and no usable body.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The server answered with a non-success status and a `msg` in the body.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request payload or response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {message}")]
    InvalidEndpoint {
        message: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// A request builder was missing a required field.
    #[error("Builder error: {0}")]
    Builder(String),
}

impl WaterCanError {
    /// Create a [`WaterCanError::Http`] error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a [`WaterCanError::InvalidEndpoint`] error carrying the parse failure.
    pub fn invalid_endpoint_with_source(message: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Result type alias for Water Can operations.
pub type WaterCanResult<T> = std::result::Result<T, WaterCanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status_and_message() {
        let err = WaterCanError::http(404, "not here");
        assert_eq!(err.to_string(), "HTTP error: 404 - not here");
    }

    #[test]
    fn invalid_endpoint_keeps_parse_error_as_source() {
        let parse_err = url::Url::parse("nope").unwrap_err();
        let err = WaterCanError::invalid_endpoint_with_source("invalid endpoint URL", parse_err);

        assert!(err.to_string().contains("invalid endpoint URL"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
