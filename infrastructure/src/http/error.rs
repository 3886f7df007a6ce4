//! Error types for the HTTP transport

use thiserror::Error;
use yara_application::TransportError;

/// Result type alias for HTTP transport operations
pub type Result<T> = std::result::Result<T, HttpTransportError>;

/// Errors that can occur when talking to the reasoning service over HTTP
#[derive(Error, Debug)]
pub enum HttpTransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    Decode { error: String, raw: String },
}

impl From<HttpTransportError> for TransportError {
    fn from(err: HttpTransportError) -> Self {
        match err {
            HttpTransportError::Http(e) if e.is_timeout() => TransportError::Timeout,
            HttpTransportError::Http(e) if e.is_connect() || e.is_request() => {
                TransportError::Connection(e.to_string())
            }
            HttpTransportError::Http(e) if e.is_decode() || e.is_body() => {
                TransportError::Decode(e.to_string())
            }
            HttpTransportError::Http(e) => TransportError::Other(e.to_string()),
            HttpTransportError::Status { status, message } => {
                TransportError::Status { status, message }
            }
            HttpTransportError::Decode { error, .. } => TransportError::Decode(error),
        }
    }
}
