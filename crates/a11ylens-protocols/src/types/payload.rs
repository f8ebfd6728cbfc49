//! Raw payload returned by the in-page scan entry point.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FiberRecord, RawFinding, ScanError};

/// Everything one in-page scan call produces, before attribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanPayload {
    /// Flattened render tree; empty when traversal failed.
    #[serde(default)]
    pub fibers: Vec<FiberRecord>,

    /// The in-page walk hit its node cap.
    #[serde(default)]
    pub fibers_truncated: bool,

    #[serde(default)]
    pub violations: Vec<RawFinding>,

    #[serde(default)]
    pub passes: Vec<RawFinding>,

    #[serde(default)]
    pub incomplete: Vec<RawFinding>,

    #[serde(default)]
    pub inapplicable: Vec<RawFinding>,

    /// Findings from the bespoke checks, violation-shaped.
    #[serde(default)]
    pub custom_findings: Vec<RawFinding>,

    /// Per-check summary from the bespoke checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_summary: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard_tests: Option<Value>,

    #[serde(default)]
    pub errors: Vec<ScanError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_version: Option<String>,
}
