//! Runs the in-page scan with retries and validates what comes back.

use std::time::Duration;

use a11ylens_protocols::{DriverError, PageHandle, ScanError, ScanFailure, ScanPayload, ScanPhase};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::bundle::{scan_expression, ScanOptions, RESTORE_NAVIGATION_EXPRESSION};
use crate::injector::Injector;
use crate::retry::RetryPolicy;

/// A validated payload and how many attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedScan {
    pub payload: ScanPayload,
    pub attempts: u32,
}

pub struct ScanExecutor<'a> {
    injector: &'a Injector,
    policy: RetryPolicy,
    /// Bound on a single in-page scan call.
    scan_timeout: Duration,
}

impl<'a> ScanExecutor<'a> {
    pub fn new(injector: &'a Injector, policy: RetryPolicy, scan_timeout: Duration) -> Self {
        Self {
            injector,
            policy,
            scan_timeout,
        }
    }

    pub async fn execute(
        &self,
        page: &dyn PageHandle,
        options: &ScanOptions,
    ) -> Result<ExecutedScan, ScanFailure> {
        let expression = scan_expression(options).map_err(|e| ScanFailure::ScannerInjection {
            reason: format!("cannot encode scan options: {}", e),
        })?;

        let retried = self
            .policy
            .run(|attempt| self.attempt(page, &expression, attempt))
            .await?;

        info!("Scan completed in {} attempt(s)", retried.attempts);
        Ok(ExecutedScan {
            payload: retried.value,
            attempts: retried.attempts,
        })
    }

    async fn attempt(
        &self,
        page: &dyn PageHandle,
        expression: &str,
        attempt: u32,
    ) -> Result<ScanPayload, DriverError> {
        debug!("Scan attempt {}", attempt);
        self.injector.ensure(page).await?;

        let result = match tokio::time::timeout(self.scan_timeout, page.evaluate(expression)).await {
            Ok(result) => result,
            Err(_) => Err(DriverError::Timeout(format!(
                "in-page scan exceeded {}ms",
                self.scan_timeout.as_millis()
            ))),
        };

        match result {
            Ok(value) => coerce_payload(value),
            Err(e) => {
                if is_transport_failure(&e) {
                    restore_navigation(page).await;
                }
                Err(e)
            }
        }
    }
}

/// Failures where the page-side `finally` may not have run.
fn is_transport_failure(e: &DriverError) -> bool {
    !matches!(
        e,
        DriverError::JavaScript(_) | DriverError::MalformedPayload(_) | DriverError::Closed
    )
}

async fn restore_navigation(page: &dyn PageHandle) {
    match page.evaluate(RESTORE_NAVIGATION_EXPRESSION).await {
        Ok(Value::Bool(true)) => debug!("Restored patched navigation"),
        Ok(_) => {}
        Err(e) => debug!("Navigation restore skipped: {}", e),
    }
}

/// Validate the raw scan result entry by entry.
///
/// Only a non-object result is an error. Malformed list entries and list
/// fields holding anything but a list are dropped and reported as
/// recoverable [`ScanError`]s in the payload.
pub fn coerce_payload(value: Value) -> Result<ScanPayload, DriverError> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(DriverError::MalformedPayload(format!(
                "scan returned {} instead of an object",
                json_kind(&other)
            )));
        }
    };

    let mut dropped = Vec::new();
    let mut payload = ScanPayload {
        fibers: take_list(&mut object, "fibers", ScanPhase::FiberTraversal, &mut dropped),
        fibers_truncated: object
            .get("fibersTruncated")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        violations: take_list(&mut object, "violations", ScanPhase::RuleEngine, &mut dropped),
        passes: take_list(&mut object, "passes", ScanPhase::RuleEngine, &mut dropped),
        incomplete: take_list(&mut object, "incomplete", ScanPhase::RuleEngine, &mut dropped),
        inapplicable: take_list(&mut object, "inapplicable", ScanPhase::RuleEngine, &mut dropped),
        custom_findings: take_list(
            &mut object,
            "customFindings",
            ScanPhase::CustomChecks,
            &mut dropped,
        ),
        custom_summary: take_value(&mut object, "customSummary"),
        keyboard_tests: take_value(&mut object, "keyboardTests"),
        errors: take_list(&mut object, "errors", ScanPhase::RuleEngine, &mut dropped),
        bundle_version: object
            .get("bundleVersion")
            .and_then(Value::as_str)
            .map(str::to_string),
    };
    payload.errors.extend(dropped);
    Ok(payload)
}

fn take_list<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    field: &str,
    phase: ScanPhase,
    dropped: &mut Vec<ScanError>,
) -> Vec<T> {
    match object.remove(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut kept = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match serde_json::from_value(item) {
                    Ok(entry) => kept.push(entry),
                    Err(e) => {
                        warn!("Dropping malformed {}[{}]: {}", field, index, e);
                        dropped.push(ScanError::recoverable(
                            phase,
                            format!("dropped malformed {} entry {}: {}", field, index, e),
                        ));
                    }
                }
            }
            kept
        }
        Some(other) => {
            warn!(
                "Scan payload field '{}' is {}, using an empty list",
                field,
                json_kind(&other)
            );
            dropped.push(ScanError::recoverable(
                phase,
                format!("{} was {}, expected a list", field, json_kind(&other)),
            ));
            Vec::new()
        }
    }
}

fn take_value(object: &mut Map<String, Value>, field: &str) -> Option<Value> {
    object.remove(field).filter(|v| !v.is_null())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
