//! Driver trait definitions.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{BrowserKind, LoadState};
use crate::error::DriverError;

/// Launches browser processes.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Start a browser of the given kind.
    async fn launch(
        &self,
        kind: BrowserKind,
        headless: bool,
    ) -> Result<Box<dyn BrowserHandle>, DriverError>;
}

/// A running browser process.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// Engine of this browser.
    fn kind(&self) -> BrowserKind;

    /// Open a fresh page.
    async fn new_page(&self) -> Result<Box<dyn PageHandle>, DriverError>;

    /// Terminate the browser. Must tolerate being called on an already
    /// closed browser.
    async fn close(&self) -> Result<(), DriverError>;
}

/// A single page the scanner drives.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Navigate and wait for the initial document to load.
    ///
    /// Returns [`DriverError::Timeout`] when `timeout` elapses first.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Wait until the page reaches `state`, or fail with a timeout.
    async fn wait_for_load_state(
        &self,
        state: LoadState,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Resolve once the main frame starts another navigation
    /// (full load or same-document history change).
    ///
    /// Only navigations that begin after this call are observed.
    async fn wait_for_navigation(&self) -> Result<(), DriverError>;

    /// Evaluate an expression in the page and return its JSON value.
    /// Promises are awaited.
    async fn evaluate(&self, expression: &str) -> Result<Value, DriverError>;

    /// Insert a `<script>` element with the given source.
    ///
    /// Success means the element was inserted; the script itself may
    /// still have thrown.
    async fn add_script_tag(&self, content: &str) -> Result<(), DriverError>;

    /// Close the page.
    async fn close(&self) -> Result<(), DriverError>;
}
