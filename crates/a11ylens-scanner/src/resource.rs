//! Scoped browser + page ownership.

use a11ylens_protocols::{
    BrowserDriver, BrowserHandle, BrowserKind, DriverError, LaunchReason, PageHandle, ScanFailure,
};
use tracing::{debug, info, warn};

/// A launched browser with one open page.
///
/// Call [`release`](Self::release) when done. If the resource is dropped
/// without it (an error path or a cancelled future), `Drop` spawns the
/// release on the current tokio runtime so the browser never outlives the
/// scan.
pub struct BrowserResource {
    kind: BrowserKind,
    handles: Option<(Box<dyn BrowserHandle>, Box<dyn PageHandle>)>,
}

impl BrowserResource {
    /// Launch a browser and open a page.
    pub async fn acquire(
        driver: &dyn BrowserDriver,
        kind: BrowserKind,
        headless: bool,
    ) -> Result<Self, ScanFailure> {
        debug!("Launching {} (headless: {})", kind, headless);
        let browser = driver
            .launch(kind, headless)
            .await
            .map_err(|e| ScanFailure::BrowserLaunch {
                browser_type: kind,
                reason: LaunchReason::from(e),
            })?;

        let page = match browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after page error: {}", close_err);
                }
                return Err(ScanFailure::BrowserLaunch {
                    browser_type: kind,
                    reason: LaunchReason::Failed(format!("could not open page: {}", e)),
                });
            }
        };

        info!("{} browser ready", kind);
        Ok(Self {
            kind,
            handles: Some((browser, page)),
        })
    }

    pub fn kind(&self) -> BrowserKind {
        self.kind
    }

    /// The page, or [`DriverError::Closed`] once released.
    pub fn page(&self) -> Result<&dyn PageHandle, DriverError> {
        self.handles
            .as_ref()
            .map(|(_, page)| page.as_ref())
            .ok_or(DriverError::Closed)
    }

    pub fn is_released(&self) -> bool {
        self.handles.is_none()
    }

    /// Close page and browser. Idempotent; teardown errors are logged.
    pub async fn release(&mut self) {
        if let Some((browser, page)) = self.handles.take() {
            close_all(browser, page).await;
        }
    }
}

async fn close_all(browser: Box<dyn BrowserHandle>, page: Box<dyn PageHandle>) {
    if let Err(e) = page.close().await {
        debug!("Page close failed during release: {}", e);
    }
    match browser.close().await {
        Ok(()) => debug!("Browser released"),
        Err(e) => warn!("Browser close failed during release: {}", e),
    }
}

impl Drop for BrowserResource {
    fn drop(&mut self) {
        let Some((browser, page)) = self.handles.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                debug!("Releasing browser from drop");
                runtime.spawn(close_all(browser, page));
            }
            Err(_) => warn!("No runtime to release browser on drop; relying on process kill"),
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
