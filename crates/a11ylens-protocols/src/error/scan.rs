//! Fatal scan errors.
//!
//! Each variant is a distinct, named condition that aborts a scan session.
//! Non-fatal problems are reported in-band as [`crate::ScanError`] entries.

use std::fmt;

use thiserror::Error;

use super::DriverError;
use crate::driver::BrowserKind;

/// Why a browser could not be launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchReason {
    /// The browser binary (or its driver) is not installed.
    NotInstalled(String),
    /// The driver does not support this browser engine.
    Unsupported(String),
    /// The browser was found but failed to start or open a page.
    Failed(String),
}

impl LaunchReason {
    pub fn is_not_installed(&self) -> bool {
        matches!(self, LaunchReason::NotInstalled(_))
    }
}

impl fmt::Display for LaunchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchReason::NotInstalled(detail) => write!(f, "browser not installed ({})", detail),
            LaunchReason::Unsupported(detail) => write!(f, "unsupported by driver ({})", detail),
            LaunchReason::Failed(detail) => write!(f, "{}", detail),
        }
    }
}

impl From<DriverError> for LaunchReason {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::NotInstalled(detail) => LaunchReason::NotInstalled(detail),
            DriverError::Unsupported(detail) => LaunchReason::Unsupported(detail),
            other => LaunchReason::Failed(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanFailure {
    #[error("Failed to launch {browser_type}: {reason}")]
    BrowserLaunch {
        browser_type: BrowserKind,
        reason: LaunchReason,
    },

    #[error("Navigation to {url} timed out after {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Failed to inject scanner: {reason}")]
    ScannerInjection { reason: String },

    #[error("Scan failed after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        attempts: u32,
        #[source]
        last_error: DriverError,
    },

    #[error("React was not detected on {url}; component attribution is impossible")]
    FrameworkNotDetected { url: String },
}

impl ScanFailure {
    /// Short machine-readable tag for the failure kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ScanFailure::BrowserLaunch { .. } => "BrowserLaunchError",
            ScanFailure::NavigationTimeout { .. } => "NavigationTimeoutError",
            ScanFailure::Navigation { .. } => "NavigationError",
            ScanFailure::ScannerInjection { .. } => "ScannerInjectionError",
            ScanFailure::MaxRetriesExceeded { .. } => "MaxRetriesExceededError",
            ScanFailure::FrameworkNotDetected { .. } => "FrameworkNotDetectedError",
        }
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
