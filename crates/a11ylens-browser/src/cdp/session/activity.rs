//! Page activity derived from CDP events.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::Instant;

use crate::cdp::protocol::PageEvent;

/// Network and lifecycle state of one page, folded from its events.
#[derive(Debug, Clone)]
pub struct PageActivity {
    inflight: HashSet<String>,
    last_network_activity: Instant,
    navigations: u64,
    dom_content_loaded: bool,
    loaded: bool,
}

impl Default for PageActivity {
    fn default() -> Self {
        Self {
            inflight: HashSet::new(),
            last_network_activity: Instant::now(),
            navigations: 0,
            dom_content_loaded: false,
            loaded: false,
        }
    }
}

impl PageActivity {
    /// Fold one event in. Returns `true` when it was a main-frame navigation.
    pub fn apply(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::RequestStarted(id) => {
                self.inflight.insert(id.clone());
                self.last_network_activity = Instant::now();
                false
            }
            PageEvent::RequestFinished(id) => {
                self.inflight.remove(id);
                self.last_network_activity = Instant::now();
                false
            }
            PageEvent::FrameNavigated => {
                self.navigations += 1;
                self.dom_content_loaded = false;
                self.loaded = false;
                true
            }
            PageEvent::NavigatedWithinDocument => {
                self.navigations += 1;
                true
            }
            PageEvent::DomContentLoaded => {
                self.dom_content_loaded = true;
                false
            }
            PageEvent::Load => {
                self.dom_content_loaded = true;
                self.loaded = true;
                false
            }
            PageEvent::Other => false,
        }
    }

    /// No request in flight and none started or finished within `quiet`.
    pub fn is_network_idle(&self, quiet: Duration) -> bool {
        self.inflight.is_empty() && self.last_network_activity.elapsed() >= quiet
    }

    /// Requests currently in flight.
    pub fn inflight(&self) -> usize {
        self.inflight.len()
    }

    /// Main-frame navigations seen so far.
    pub fn navigations(&self) -> u64 {
        self.navigations
    }

    pub fn dom_content_loaded(&self) -> bool {
        self.dom_content_loaded
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }
}
