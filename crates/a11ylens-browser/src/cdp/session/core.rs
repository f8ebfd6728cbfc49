//! Core session struct, CDP command dispatch and event tracking.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use crate::cdp::client::CdpChannel;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::{CdpResponse, PageEvent};

use super::activity::PageActivity;

/// A session attached to a single page/target.
pub struct PageSession {
    /// Target ID.
    pub(super) target_id: String,
    /// Session ID for this target.
    pub(super) session_id: String,
    /// Command channel (shared with client).
    pub(super) channel: CdpChannel,
    /// State folded from this page's events.
    pub(super) activity: Arc<Mutex<PageActivity>>,
    /// Navigation counter, bumped by the tracker task.
    pub(super) navigations: watch::Receiver<u64>,
    tracker: tokio::task::JoinHandle<()>,
}

impl PageSession {
    /// Create a new page session and start tracking its events.
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        channel: CdpChannel,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        let activity = Arc::new(Mutex::new(PageActivity::default()));
        let (nav_tx, nav_rx) = watch::channel(0u64);

        let tracker = tokio::spawn(Self::track_events(event_rx, activity.clone(), nav_tx));

        Self {
            target_id,
            session_id,
            channel,
            activity,
            navigations: nav_rx,
            tracker,
        }
    }

    async fn track_events(
        mut event_rx: mpsc::UnboundedReceiver<CdpResponse>,
        activity: Arc<Mutex<PageActivity>>,
        nav_tx: watch::Sender<u64>,
    ) {
        while let Some(resp) = event_rx.recv().await {
            let Some(method) = resp.method.as_deref() else {
                continue;
            };
            let params = resp.params.unwrap_or(Value::Null);
            let event = PageEvent::from_cdp(method, &params);
            if event == PageEvent::Other {
                continue;
            }
            trace!("Page event: {:?}", event);

            let navigated = {
                let mut state = activity.lock();
                state.apply(&event).then(|| state.navigations())
            };
            if let Some(count) = navigated {
                let _ = nav_tx.send(count);
            }
        }
        trace!("Page event stream ended");
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.channel
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        self.call("Network.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.tracker.abort();
    }
}
