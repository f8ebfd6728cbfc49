//! [`BrowserDriver`] implementation backed by CDP.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use a11ylens_protocols::{
    BrowserDriver, BrowserHandle, BrowserKind, DriverError, LoadState, PageHandle,
};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, PageSession};
use crate::launcher::{ChromeLauncher, LaunchedChrome, LauncherConfig};

/// Grace period for `Browser.close` before the process is killed.
const GRACEFUL_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Launches Chromium and drives it over CDP.
///
/// Only [`BrowserKind::Chromium`] is supported.
#[derive(Debug, Clone, Default)]
pub struct CdpDriver {
    config: LauncherConfig,
}

impl CdpDriver {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserDriver for CdpDriver {
    async fn launch(
        &self,
        kind: BrowserKind,
        headless: bool,
    ) -> Result<Box<dyn BrowserHandle>, DriverError> {
        if kind != BrowserKind::Chromium {
            return Err(DriverError::Unsupported(format!(
                "{} cannot be driven over CDP; use chromium",
                kind
            )));
        }

        let launcher = ChromeLauncher::new(LauncherConfig {
            headless,
            ..self.config.clone()
        });
        let chrome = launcher.launch().await?;

        let client = match CdpClient::connect(&chrome.endpoint(), self.config.command_timeout).await
        {
            Ok(client) => client,
            Err(e) => {
                chrome.shutdown().await;
                return Err(DriverError::LaunchFailed(e.to_string()));
            }
        };

        info!("Chromium ready on port {}", chrome.port());
        Ok(Box::new(CdpBrowser {
            kind,
            client: Arc::new(client),
            chrome: Mutex::new(Some(chrome)),
        }))
    }
}

/// A running Chromium owned by this process.
pub struct CdpBrowser {
    kind: BrowserKind,
    client: Arc<CdpClient>,
    chrome: Mutex<Option<LaunchedChrome>>,
}

#[async_trait]
impl BrowserHandle for CdpBrowser {
    fn kind(&self) -> BrowserKind {
        self.kind
    }

    async fn new_page(&self) -> Result<Box<dyn PageHandle>, DriverError> {
        if self.chrome.lock().await.is_none() {
            return Err(DriverError::Closed);
        }
        let session = self.client.new_page().await?;
        debug!("Opened page {}", session.target_id());
        Ok(Box::new(CdpPage {
            client: self.client.clone(),
            session,
            closed: AtomicBool::new(false),
        }))
    }

    async fn close(&self) -> Result<(), DriverError> {
        let Some(chrome) = self.chrome.lock().await.take() else {
            return Ok(());
        };

        match tokio::time::timeout(GRACEFUL_CLOSE_TIMEOUT, self.client.close_browser()).await {
            Ok(Ok(())) => debug!("Browser.close acknowledged"),
            Ok(Err(e)) => warn!("Browser.close failed: {}", e),
            Err(_) => warn!("Browser.close timed out"),
        }
        chrome.shutdown().await;
        Ok(())
    }
}

/// One page of a [`CdpBrowser`].
pub struct CdpPage {
    client: Arc<CdpClient>,
    session: PageSession,
    closed: AtomicBool,
}

#[async_trait]
impl PageHandle for CdpPage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let deadline = tokio::time::Instant::now() + timeout;
        let timed_out = || {
            DriverError::Timeout(format!(
                "navigation to {} exceeded {}ms",
                url,
                timeout.as_millis()
            ))
        };

        tokio::time::timeout_at(deadline, self.session.navigate(url))
            .await
            .map_err(|_| timed_out())??;

        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        self.session
            .wait_for_load(LoadState::Load, remaining)
            .await
            .map_err(|_| timed_out())
    }

    async fn wait_for_load_state(
        &self,
        state: LoadState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        Ok(self.session.wait_for_load(state, timeout).await?)
    }

    async fn wait_for_navigation(&self) -> Result<(), DriverError> {
        Ok(self.session.wait_for_navigation().await?)
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, DriverError> {
        Ok(self.session.evaluate(expression).await?)
    }

    async fn add_script_tag(&self, content: &str) -> Result<(), DriverError> {
        Ok(self.session.add_script_tag(content).await?)
    }

    async fn close(&self) -> Result<(), DriverError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        Ok(self.client.close_page(&self.session).await?)
    }
}
