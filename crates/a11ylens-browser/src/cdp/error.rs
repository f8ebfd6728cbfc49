//! CDP error types.

use a11ylens_protocols::DriverError;
use thiserror::Error;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chromium.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answering on the debugging endpoint.
    #[error("Chromium not available at {0}")]
    ChromeNotAvailable(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// Timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Session closed.
    #[error("Session closed")]
    SessionClosed,

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Chromium reports a navigated-away page as a protocol or JS error
    /// mentioning the execution context.
    pub fn is_context_destroyed(&self) -> bool {
        let message = match self {
            CdpError::Protocol { message, .. } => message,
            CdpError::JavaScript(message) => message,
            _ => return false,
        };
        message.contains("Execution context was destroyed")
            || message.contains("Cannot find context with specified id")
            || message.contains("Inspected target navigated or closed")
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        if e.is_context_destroyed() {
            return DriverError::ContextDestroyed(e.to_string());
        }
        match e {
            CdpError::NavigationFailed(msg) => DriverError::NavigationFailed(msg),
            CdpError::JavaScript(msg) => DriverError::JavaScript(msg),
            CdpError::Timeout(msg) => DriverError::Timeout(msg),
            CdpError::SessionClosed => DriverError::Closed,
            CdpError::WebSocket(_) => DriverError::Closed,
            CdpError::ConnectionFailed(msg) | CdpError::ChromeNotAvailable(msg) => {
                DriverError::LaunchFailed(msg)
            }
            other => DriverError::Protocol(other.to_string()),
        }
    }
}
