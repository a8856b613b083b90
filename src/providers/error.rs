//! Connector error types and handling

use thiserror::Error;

/// Result type for provider operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Errors that can occur while driving the vendor chat API
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Service unavailable
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    /// Timeout occurred
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Response parsing error
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Vendor API returned an error
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Configuration error (missing credential, bad client setup)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ConnectorError::Timeout(30) // Default timeout value
        } else if err.is_connect() {
            ConnectorError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            if let Some(status) = err.status() {
                match status.as_u16() {
                    401 | 403 => ConnectorError::Authentication(err.to_string()),
                    404 => ConnectorError::ModelNotFound(err.to_string()),
                    500..=599 => ConnectorError::ServiceUnavailable(err.to_string()),
                    _ => ConnectorError::Api {
                        code: status.to_string(),
                        message: err.to_string(),
                    },
                }
            } else {
                ConnectorError::Other(err.to_string())
            }
        } else {
            ConnectorError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::Parse(err.to_string())
    }
}
