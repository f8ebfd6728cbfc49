//! Scan session: one URL, one browser, one report.
//!
//! ```text
//! acquire ─► stabilize ─► detect ─► inject ─► execute ─► map ─► attribute ─► aggregate
//!    │                                                                           │
//!    └──────────────────────────── release (always) ◄────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use a11ylens_config::{Config, ConfigError, ConfigValidator};
use a11ylens_protocols::{
    BrowserDriver, BrowserKind, LaunchReason, NavigationState, PageHandle, ScanError,
    ScanFailure, ScanMetadata, ScanPhase, ScanResult,
};
use chrono::Utc;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::aggregator::{aggregate, AggregateInput};
use crate::attribution::Attributor;
use crate::bundle::{ScanOptions, DETECT_FRAMEWORK_EXPRESSION};
use crate::component_map::ComponentMapBuilder;
use crate::executor::{ExecutedScan, ScanExecutor};
use crate::filter::FrameworkFilter;
use crate::injector::Injector;
use crate::resource::BrowserResource;
use crate::retry::{Backoff, RetryPolicy};
use crate::stabilizer::{NavigationStabilizer, StabilizerConfig};

/// Immutable per-scan settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: String,
    pub browser: BrowserKind,
    pub headless: bool,
    pub stabilizer: StabilizerConfig,
    pub retry: RetryPolicy,
    pub scan_timeout: Duration,
    pub options: ScanOptions,
    pub filter: FrameworkFilter,
    pub rule_engine_script: Option<PathBuf>,
}

impl SessionConfig {
    /// Derive session settings for `url` from a loaded [`Config`].
    pub fn from_config(url: impl Into<String>, config: &Config) -> Result<Self, ConfigError> {
        let url = url.into();
        ConfigValidator::validate_url(&url)?;

        let filter = FrameworkFilter::new(config.attribution.patterns()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "attribution.framework_patterns".to_string(),
                message: e.to_string(),
            }
        })?;

        let scanner = &config.scanner;
        Ok(Self {
            url,
            browser: config.browser.kind,
            headless: config.browser.headless,
            stabilizer: StabilizerConfig::from(&config.navigation),
            retry: RetryPolicy::new(
                scanner.max_retries,
                Backoff::Linear(scanner.retry_delay_base()),
            ),
            scan_timeout: scanner.scan_timeout(),
            options: ScanOptions {
                tags: scanner.tags.clone(),
                max_components: scanner.max_components,
                include_passes: scanner.include_passes,
                include_incomplete: scanner.include_incomplete,
                include_inapplicable: scanner.include_inapplicable,
            },
            filter,
            rule_engine_script: scanner.rule_engine_script.clone(),
        })
    }
}

pub struct ScanSession {
    config: SessionConfig,
    driver: Arc<dyn BrowserDriver>,
}

impl ScanSession {
    pub fn new(config: SessionConfig, driver: Arc<dyn BrowserDriver>) -> Self {
        Self { config, driver }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run the scan. The browser is released on every exit path; if this
    /// future is dropped mid-scan the release happens in the background.
    pub async fn run(&self) -> Result<ScanResult, ScanFailure> {
        let started = Instant::now();
        info!("Scanning {}", self.config.url);

        let injector = Injector::from_script(self.config.rule_engine_script.as_deref()).await?;

        let mut resource =
            BrowserResource::acquire(self.driver.as_ref(), self.config.browser, self.config.headless)
                .await?;

        let outcome = match resource.page() {
            Ok(page) => self.scan(page, &injector, started).await,
            Err(e) => Err(ScanFailure::BrowserLaunch {
                browser_type: self.config.browser,
                reason: LaunchReason::from(e),
            }),
        };

        resource.release().await;

        match &outcome {
            Ok(result) => info!(
                "Scan of {} finished in {}ms: {} violation instance(s)",
                result.url, result.metadata.duration_ms, result.summary.total_violations
            ),
            Err(e) => warn!("Scan of {} failed: {}", self.config.url, e),
        }
        outcome
    }

    async fn scan(
        &self,
        page: &dyn PageHandle,
        injector: &Injector,
        started: Instant,
    ) -> Result<ScanResult, ScanFailure> {
        let timestamp = Utc::now();
        let url = &self.config.url;

        let navigation = NavigationStabilizer::new(self.config.stabilizer.clone())
            .run(page, url)
            .await?;

        self.detect_framework(page).await?;
        injector.inject(page).await?;

        let executed = ScanExecutor::new(injector, self.config.retry.clone(), self.config.scan_timeout)
            .execute(page, &self.config.options)
            .await?;

        Ok(self.build_report(executed, navigation, timestamp, started))
    }

    async fn detect_framework(&self, page: &dyn PageHandle) -> Result<(), ScanFailure> {
        match page.evaluate(DETECT_FRAMEWORK_EXPRESSION).await {
            Ok(Value::Bool(false)) => Err(ScanFailure::FrameworkNotDetected {
                url: self.config.url.clone(),
            }),
            Ok(_) => {
                debug!("React detected");
                Ok(())
            }
            Err(e) => {
                warn!("Framework detection failed, scanning anyway: {}", e);
                Ok(())
            }
        }
    }

    fn build_report(
        &self,
        executed: ExecutedScan,
        navigation: NavigationState,
        timestamp: chrono::DateTime<Utc>,
        started: Instant,
    ) -> ScanResult {
        let ExecutedScan { payload, attempts } = executed;
        let options = &self.config.options;

        let map = ComponentMapBuilder::new(options.max_components).build(&payload.fibers);
        debug!(
            "Component map: {} components, {} DOM nodes",
            map.component_count(),
            map.dom.len()
        );

        let mut errors = payload.errors;
        if map.truncated {
            errors.push(ScanError::recoverable(
                ScanPhase::TreeBuilding,
                format!(
                    "component tree truncated at {} records",
                    options.max_components
                ),
            ));
        }

        let attributor = Attributor::new(&map.dom, &self.config.filter);
        let violations =
            attributor.attribute_violations(payload.violations.iter().chain(&payload.custom_findings));
        let passes = options
            .include_passes
            .then(|| attributor.attribute_results(&payload.passes));
        let incomplete = options
            .include_incomplete
            .then(|| attributor.attribute_results(&payload.incomplete));
        let inapplicable = options
            .include_inapplicable
            .then(|| attributor.attribute_results(&payload.inapplicable));

        let metadata = ScanMetadata {
            duration_ms: started.elapsed().as_millis() as u64,
            navigation,
            scan_attempts: attempts,
            components_truncated: map.truncated || payload.fibers_truncated,
            bundle_version: payload.bundle_version,
        };

        aggregate(AggregateInput {
            url: self.config.url.clone(),
            timestamp,
            browser: self.config.browser,
            components: map.components,
            violations,
            passes,
            incomplete,
            inapplicable,
            keyboard_tests: payload.keyboard_tests,
            custom_summary: payload.custom_summary,
            errors,
            metadata,
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
