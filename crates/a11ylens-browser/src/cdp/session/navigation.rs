//! Navigation and load-state waits for CDP page session.

use std::time::Duration;

use a11ylens_protocols::LoadState;
use serde_json::json;
use tracing::{debug, trace};

use crate::cdp::error::CdpError;

use super::core::PageSession;

/// Quiet window after the last request before the network counts as idle.
pub const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Start navigating to `url`. Returns the frame id once the navigation
    /// is committed; does not wait for load.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        debug!("Navigation to {} committed", url);
        Ok(frame_id)
    }

    /// Wait until the page reaches `state` or `timeout` elapses.
    pub async fn wait_for_load(&self, state: LoadState, timeout: Duration) -> Result<(), CdpError> {
        tokio::time::timeout(timeout, async {
            loop {
                if self.reached(state).await {
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await
        .map_err(|_| CdpError::Timeout(format!("Waiting for {:?} timed out", state)))
    }

    async fn reached(&self, state: LoadState) -> bool {
        if state == LoadState::NetworkIdle {
            return self.activity.lock().is_network_idle(NETWORK_QUIET_WINDOW);
        }

        // Lifecycle events can be missed if they fired before Page.enable,
        // so fall back to asking the document.
        {
            let activity = self.activity.lock();
            let seen = match state {
                LoadState::DomContentLoaded => activity.dom_content_loaded(),
                _ => activity.loaded(),
            };
            if seen {
                return true;
            }
        }

        match self.evaluate("document.readyState").await {
            Ok(value) => match (state, value.as_str()) {
                (_, Some("complete")) => true,
                (LoadState::DomContentLoaded, Some("interactive")) => true,
                _ => false,
            },
            // The document is being replaced; keep polling.
            Err(e) => {
                trace!("readyState check failed: {}", e);
                false
            }
        }
    }

    /// Resolve on the next main-frame navigation after this call.
    pub async fn wait_for_navigation(&self) -> Result<(), CdpError> {
        let mut navigations = self.navigations.clone();
        navigations.borrow_and_update();
        navigations
            .changed()
            .await
            .map_err(|_| CdpError::SessionClosed)
    }
}
