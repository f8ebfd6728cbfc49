//! Browser driver errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("Browser executable not found: {0}")]
    NotInstalled(String),

    #[error("Unsupported browser: {0}")]
    Unsupported(String),

    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Execution context destroyed: {0}")]
    ContextDestroyed(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The page answered, but not with a scan payload. Retrying returns
    /// the same answer.
    #[error("Malformed scan payload: {0}")]
    MalformedPayload(String),

    #[error("Page closed")]
    Closed,
}

impl DriverError {
    /// Whether retrying the same operation on the same page can succeed.
    ///
    /// Closed pages, launch-time failures and malformed payloads are
    /// permanent; other failures inside a live page are treated as
    /// transient.
    pub fn is_transient(&self) -> bool {
        match self {
            DriverError::NavigationFailed(_)
            | DriverError::Timeout(_)
            | DriverError::JavaScript(_)
            | DriverError::ContextDestroyed(_)
            | DriverError::Protocol(_) => true,
            DriverError::NotInstalled(_)
            | DriverError::Unsupported(_)
            | DriverError::LaunchFailed(_)
            | DriverError::MalformedPayload(_)
            | DriverError::Closed => false,
        }
    }
}
