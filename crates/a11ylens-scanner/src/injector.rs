//! Installs the rule engine and scanner bundle into a page.

use std::path::Path;
use std::sync::Arc;

use a11ylens_protocols::{DriverError, PageHandle, ScanFailure};
use tracing::{debug, info};

use crate::bundle::{
    BUNDLE_SOURCE, IS_INJECTED_EXPRESSION, MARKER_GLOBAL, RULE_ENGINE_PRESENT_EXPRESSION,
};

#[derive(Debug, Clone, Default)]
pub struct Injector {
    rule_engine: Option<Arc<str>>,
}

impl Injector {
    /// Injector that also installs `rule_engine` (axe-core source) when the
    /// page does not already have it.
    pub fn new(rule_engine: Option<String>) -> Self {
        Self {
            rule_engine: rule_engine.map(Arc::from),
        }
    }

    /// Read the rule engine source from disk.
    pub async fn from_script(path: Option<&Path>) -> Result<Self, ScanFailure> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            ScanFailure::ScannerInjection {
                reason: format!("cannot read rule engine script {}: {}", path.display(), e),
            }
        })?;
        debug!("Loaded rule engine from {} ({} bytes)", path.display(), source.len());
        Ok(Self::new(Some(source)))
    }

    pub fn has_rule_engine(&self) -> bool {
        self.rule_engine.is_some()
    }

    /// Whether the scanner marker global is present and usable.
    pub async fn is_injected(&self, page: &dyn PageHandle) -> bool {
        match page.evaluate(IS_INJECTED_EXPRESSION).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(e) => {
                debug!("Injection check failed: {}", e);
                false
            }
        }
    }

    /// Install if missing and confirm the marker.
    pub async fn inject(&self, page: &dyn PageHandle) -> Result<(), ScanFailure> {
        self.ensure(page)
            .await
            .map_err(|e| ScanFailure::ScannerInjection {
                reason: e.to_string(),
            })
    }

    /// [`inject`](Self::inject) with driver-level errors, for use inside
    /// retried operations.
    pub(crate) async fn ensure(&self, page: &dyn PageHandle) -> Result<(), DriverError> {
        if self.is_injected(page).await {
            debug!("Scanner already present");
            return Ok(());
        }

        if let Some(source) = &self.rule_engine {
            let present = page
                .evaluate(RULE_ENGINE_PRESENT_EXPRESSION)
                .await?
                .as_bool()
                .unwrap_or(false);
            if !present {
                page.add_script_tag(source).await?;
                debug!("Rule engine installed");
            }
        } else {
            debug!("No rule engine script configured; relying on the page to provide axe");
        }

        page.add_script_tag(BUNDLE_SOURCE).await?;

        if !self.is_injected(page).await {
            return Err(DriverError::JavaScript(format!(
                "window.{} missing after injection",
                MARKER_GLOBAL
            )));
        }
        info!("Scanner injected");
        Ok(())
    }
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;
