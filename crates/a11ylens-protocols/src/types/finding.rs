//! Rule-engine findings, raw and attributed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Four-level impact scale used by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
        }
    }

    /// Parse one of the four scale names, case-insensitively.
    pub fn parse(value: &str) -> Option<Impact> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minor" => Some(Impact::Minor),
            "moderate" => Some(Impact::Moderate),
            "serious" => Some(Impact::Serious),
            "critical" => Some(Impact::Critical),
            _ => None,
        }
    }
}

/// Off-scale impacts from custom checks become `None` instead of failing
/// the whole finding.
fn lenient_impact<'de, D>(deserializer: D) -> Result<Option<Impact>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => {
            let impact = Impact::parse(&name);
            if impact.is_none() {
                warn!("Unknown impact '{}', treating as unset", name);
            }
            impact
        }
        Some(other) => {
            warn!("Impact is not a string ({}), treating as unset", other);
            None
        }
    })
}

/// One affected DOM node as reported by the rule engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default)]
    pub html: String,

    /// CSS locator path; one entry per shadow/iframe boundary.
    #[serde(default)]
    pub target: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,

    /// Rule-specific check detail (`any`/`all`/`none` for axe).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<Value>,

    /// Identity of the nearest DOM element the bundle tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom_node: Option<u64>,
}

/// A violation, pass, incomplete or inapplicable entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFinding {
    pub id: String,

    #[serde(default, deserialize_with = "lenient_impact")]
    pub impact: Option<Impact>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub help_url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub nodes: Vec<RawNode>,

    /// Payload specific to custom checks (target size shortfall, focus ring
    /// metrics, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// A violation node enriched with component attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributedNode {
    pub html: String,
    pub target: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Value>,
    /// Nearest enclosing component.
    pub component: Option<String>,
    /// Ancestor chain, root first, nearest component last.
    pub component_path: Vec<String>,
    /// `component_path` with framework-internal names removed.
    pub user_component_path: Vec<String>,
    pub is_framework_component: bool,
}

/// A violation with every node attributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributedFinding {
    pub id: String,
    pub impact: Option<Impact>,
    pub description: String,
    pub help: String,
    pub help_url: String,
    pub tags: Vec<String>,
    /// Success criteria derived from tags, e.g. `1.4.3`.
    pub wcag_criteria: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub nodes: Vec<AttributedNode>,
}

impl AttributedFinding {
    /// Number of finding instances (affected nodes).
    pub fn instance_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Locator-only attribution used for passes and incomplete results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightNode {
    pub target: Vec<String>,
    pub component: Option<String>,
}

/// Pass / incomplete / inapplicable entry with light attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributedResult {
    pub id: String,
    pub impact: Option<Impact>,
    pub description: String,
    pub help: String,
    pub nodes: Vec<LightNode>,
}

#[cfg(test)]
#[path = "finding_tests.rs"]
mod tests;
