//! Final report types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AttributedFinding, AttributedResult, ComponentNode};
use crate::driver::BrowserKind;

/// Stage of the in-page scan that produced a non-fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanPhase {
    #[serde(rename = "fiber-traversal", alias = "component-traversal")]
    FiberTraversal,
    #[serde(rename = "rule-engine")]
    RuleEngine,
    #[serde(rename = "keyboard-tests")]
    KeyboardTests,
    #[serde(rename = "custom-checks")]
    CustomChecks,
    #[serde(rename = "tree-building")]
    TreeBuilding,
}

impl ScanPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanPhase::FiberTraversal => "fiber-traversal",
            ScanPhase::RuleEngine => "rule-engine",
            ScanPhase::KeyboardTests => "keyboard-tests",
            ScanPhase::CustomChecks => "custom-checks",
            ScanPhase::TreeBuilding => "tree-building",
        }
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem recorded during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub phase: ScanPhase,
    pub message: String,
    #[serde(default = "default_recoverable")]
    pub recoverable: bool,
}

fn default_recoverable() -> bool {
    true
}

impl ScanError {
    pub fn recoverable(phase: ScanPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
            recoverable: true,
        }
    }
}

/// Outcome of one stabilization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub is_stable: bool,
    pub navigation_count: u32,
}

/// Violation instances per impact level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactCounts {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
}

impl ImpactCounts {
    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor
    }
}

/// Violation instances per WCAG conformance level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcagLevelCounts {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "AA")]
    pub aa: usize,
    #[serde(rename = "AAA")]
    pub aaa: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_components: usize,
    /// Sum of affected nodes over all violations.
    pub total_violations: usize,
    pub violations_by_impact: ImpactCounts,
    /// Distinct named components with at least one violation.
    pub components_with_violations: usize,
    /// Violation instances with no enclosing component.
    pub unattributed_violations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations_by_wcag_level: Option<WcagLevelCounts>,
    pub total_passes: usize,
    pub total_incomplete: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub duration_ms: u64,
    pub navigation: NavigationState,
    pub scan_attempts: u32,
    pub components_truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_version: Option<String>,
}

/// The report handed to CLI, web and export layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub browser: BrowserKind,
    pub components: Vec<ComponentNode>,
    pub violations: Vec<AttributedFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passes: Option<Vec<AttributedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<Vec<AttributedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inapplicable: Option<Vec<AttributedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard_tests: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcag22: Option<Value>,
    pub summary: ScanSummary,
    pub errors: Vec<ScanError>,
    pub metadata: ScanMetadata,
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
