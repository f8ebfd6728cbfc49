//! Navigation stabilizer.
//!
//! Single-page apps keep navigating after the initial load (redirects to a
//! login route, locale prefixes, query normalisation). Scanning mid-flight
//! attributes findings to a page that is about to disappear, so the
//! stabilizer waits for the page to settle first:
//!
//! ```text
//! goto ──► [network idle?] ──► delay ──► select! { biased;
//!                ▲                          navigation ─► count += 1 ─┐
//!                │                          interval   ─► stable      │
//!                └────────────────────────────────────────────────────┘
//! ```
//!
//! The loop ends when the page is stable or `max_navigation_waits`
//! navigations were observed; the latter proceeds with a warning.

use std::time::Duration;

use a11ylens_config::NavigationConfig;
use a11ylens_protocols::{DriverError, LoadState, NavigationState, PageHandle, ScanFailure};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Timing budget for stabilization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizerConfig {
    pub navigation_timeout: Duration,
    pub network_idle_timeout: Duration,
    pub post_navigation_delay: Duration,
    pub navigation_check_interval: Duration,
    pub max_navigation_waits: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self::from(&NavigationConfig::default())
    }
}

impl From<&NavigationConfig> for StabilizerConfig {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout(),
            network_idle_timeout: config.network_idle_timeout(),
            post_navigation_delay: config.post_navigation_delay(),
            navigation_check_interval: config.navigation_check_interval(),
            max_navigation_waits: config.max_navigation_waits,
        }
    }
}

pub struct NavigationStabilizer {
    config: StabilizerConfig,
}

impl NavigationStabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self { config }
    }

    /// Navigate to `url`, then wait for the page to settle.
    pub async fn run(&self, page: &dyn PageHandle, url: &str) -> Result<NavigationState, ScanFailure> {
        self.navigate(page, url).await?;
        Ok(self.stabilize(page).await)
    }

    /// Initial navigation, bounded by `navigation_timeout`.
    pub async fn navigate(&self, page: &dyn PageHandle, url: &str) -> Result<(), ScanFailure> {
        let timeout = self.config.navigation_timeout;
        let timeout_err = || ScanFailure::NavigationTimeout {
            url: url.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        };

        debug!("Navigating to {}", url);
        match tokio::time::timeout(timeout, page.goto(url, timeout)).await {
            Err(_) | Ok(Err(DriverError::Timeout(_))) => Err(timeout_err()),
            Ok(Err(e)) => Err(ScanFailure::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Ok(Ok(())) => Ok(()),
        }
    }

    /// Wait until no further navigation starts within one check interval.
    pub async fn stabilize(&self, page: &dyn PageHandle) -> NavigationState {
        let mut state = NavigationState::default();

        while !state.is_stable && state.navigation_count < self.config.max_navigation_waits {
            if let Err(e) = page
                .wait_for_load_state(LoadState::NetworkIdle, self.config.network_idle_timeout)
                .await
            {
                warn!(
                    "Network did not go idle within {:?}, continuing: {}",
                    self.config.network_idle_timeout, e
                );
            }

            sleep(self.config.post_navigation_delay).await;

            tokio::select! {
                biased;

                navigated = page.wait_for_navigation() => match navigated {
                    Ok(()) => {
                        state.navigation_count += 1;
                        debug!(
                            "Client-side navigation {}/{}",
                            state.navigation_count, self.config.max_navigation_waits
                        );
                    }
                    Err(e) => {
                        warn!("Cannot observe navigations, scanning as is: {}", e);
                        break;
                    }
                },
                _ = sleep(self.config.navigation_check_interval) => {
                    state.is_stable = true;
                }
            }
        }

        if state.is_stable {
            info!("Page stable after {} navigation(s)", state.navigation_count);
        } else {
            warn!(
                "Page still navigating after {} waits, scanning anyway",
                state.navigation_count
            );
        }
        state
    }
}

#[cfg(test)]
#[path = "stabilizer_tests.rs"]
mod tests;
