//! Final report assembly.

use std::collections::HashSet;

use a11ylens_protocols::{
    AttributedFinding, AttributedResult, BrowserKind, ComponentKind, ComponentNode, Impact,
    ImpactCounts, ScanError, ScanMetadata, ScanResult, ScanSummary, WcagLevelCounts,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::wcag::{self, WcagLevel};

/// Everything the report is built from.
#[derive(Debug, Clone)]
pub struct AggregateInput {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub browser: BrowserKind,
    pub components: Vec<ComponentNode>,
    pub violations: Vec<AttributedFinding>,
    pub passes: Option<Vec<AttributedResult>>,
    pub incomplete: Option<Vec<AttributedResult>>,
    pub inapplicable: Option<Vec<AttributedResult>>,
    pub keyboard_tests: Option<Value>,
    pub custom_summary: Option<Value>,
    pub errors: Vec<ScanError>,
    pub metadata: ScanMetadata,
}

pub fn aggregate(input: AggregateInput) -> ScanResult {
    let summary = summarize(
        &input.components,
        &input.violations,
        input.passes.as_deref(),
        input.incomplete.as_deref(),
    );

    ScanResult {
        url: input.url,
        timestamp: input.timestamp,
        browser: input.browser,
        components: input.components,
        violations: input.violations,
        passes: input.passes,
        incomplete: input.incomplete,
        inapplicable: input.inapplicable,
        keyboard_tests: input.keyboard_tests,
        wcag22: input.custom_summary,
        summary,
        errors: input.errors,
        metadata: input.metadata,
    }
}

pub fn summarize(
    components: &[ComponentNode],
    violations: &[AttributedFinding],
    passes: Option<&[AttributedResult]>,
    incomplete: Option<&[AttributedResult]>,
) -> ScanSummary {
    let mut by_impact = ImpactCounts::default();
    let mut by_level = WcagLevelCounts::default();
    let mut with_violations: HashSet<&str> = HashSet::new();
    let mut unattributed = 0;

    for finding in violations {
        let instances = finding.instance_count();

        let bucket = match finding.impact.unwrap_or(Impact::Minor) {
            Impact::Critical => &mut by_impact.critical,
            Impact::Serious => &mut by_impact.serious,
            Impact::Moderate => &mut by_impact.moderate,
            Impact::Minor => &mut by_impact.minor,
        };
        *bucket += instances;

        match wcag::level_of(&finding.tags) {
            Some(WcagLevel::A) => by_level.a += instances,
            Some(WcagLevel::AA) => by_level.aa += instances,
            Some(WcagLevel::AAA) => by_level.aaa += instances,
            None => {}
        }

        for node in &finding.nodes {
            match node.component.as_deref() {
                Some(name) => {
                    with_violations.insert(name);
                }
                None => unattributed += 1,
            }
        }
    }

    ScanSummary {
        total_components: components
            .iter()
            .filter(|c| c.kind == ComponentKind::Component)
            .count(),
        total_violations: violations.iter().map(AttributedFinding::instance_count).sum(),
        violations_by_impact: by_impact,
        components_with_violations: with_violations.len(),
        unattributed_violations: unattributed,
        violations_by_wcag_level: Some(by_level),
        total_passes: passes.map_or(0, <[_]>::len),
        total_incomplete: incomplete.map_or(0, <[_]>::len),
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
