//! Maps rule-engine findings onto the component tree.

use a11ylens_protocols::{
    AttributedFinding, AttributedNode, AttributedResult, LightNode, RawFinding, RawNode,
};

use crate::component_map::DomComponentMap;
use crate::filter::FrameworkFilter;
use crate::wcag;

/// Pure attribution over a built [`DomComponentMap`].
pub struct Attributor<'a> {
    map: &'a DomComponentMap,
    filter: &'a FrameworkFilter,
}

impl<'a> Attributor<'a> {
    pub fn new(map: &'a DomComponentMap, filter: &'a FrameworkFilter) -> Self {
        Self { map, filter }
    }

    fn component_path(&self, node: &RawNode) -> &'a [String] {
        node.dom_node
            .and_then(|id| self.map.path(id))
            .unwrap_or(&[])
    }

    pub fn attribute_node(&self, node: &RawNode) -> AttributedNode {
        let path = self.component_path(node);
        let component = path.last().cloned();
        let is_framework_component = component
            .as_deref()
            .is_some_and(|name| self.filter.is_framework(name));

        AttributedNode {
            html: node.html.clone(),
            target: node.target.clone(),
            failure_summary: node.failure_summary.clone(),
            checks: node.checks.clone(),
            component,
            component_path: path.to_vec(),
            user_component_path: self.filter.user_path(path),
            is_framework_component,
        }
    }

    /// Full attribution for a violation or custom-check finding.
    pub fn attribute_violation(&self, finding: &RawFinding) -> AttributedFinding {
        AttributedFinding {
            id: finding.id.clone(),
            impact: finding.impact,
            description: finding.description.clone(),
            help: finding.help.clone(),
            help_url: finding.help_url.clone(),
            tags: finding.tags.clone(),
            wcag_criteria: wcag::criteria(&finding.tags),
            details: finding.details.clone(),
            nodes: finding.nodes.iter().map(|n| self.attribute_node(n)).collect(),
        }
    }

    /// Target and nearest component only, duplicates dropped.
    pub fn attribute_light(&self, finding: &RawFinding) -> AttributedResult {
        let mut nodes: Vec<LightNode> = Vec::with_capacity(finding.nodes.len());
        for node in &finding.nodes {
            let light = LightNode {
                target: node.target.clone(),
                component: self.component_path(node).last().cloned(),
            };
            if !nodes.contains(&light) {
                nodes.push(light);
            }
        }

        AttributedResult {
            id: finding.id.clone(),
            impact: finding.impact,
            description: finding.description.clone(),
            help: finding.help.clone(),
            nodes,
        }
    }

    /// Violations followed by custom-check findings, all fully attributed.
    pub fn attribute_violations<'f>(
        &self,
        findings: impl IntoIterator<Item = &'f RawFinding>,
    ) -> Vec<AttributedFinding> {
        findings
            .into_iter()
            .map(|f| self.attribute_violation(f))
            .collect()
    }

    pub fn attribute_results(&self, findings: &[RawFinding]) -> Vec<AttributedResult> {
        findings.iter().map(|f| self.attribute_light(f)).collect()
    }
}

#[cfg(test)]
#[path = "attribution_tests.rs"]
mod tests;
