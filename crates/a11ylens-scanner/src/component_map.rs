//! Component tree reconstruction from the in-page fiber snapshot.
//!
//! The bundle ships a flat list of [`FiberRecord`]s linked by parent id.
//! [`ComponentMapBuilder`] walks it depth first from the roots and produces
//! the report's component list plus a [`DomComponentMap`] used by
//! attribution.

use std::collections::{HashMap, HashSet};

use a11ylens_protocols::{ComponentKind, ComponentNode, FiberRecord};
use tracing::{debug, warn};

/// Default cap on visited records.
pub const DEFAULT_MAX_COMPONENTS: usize = 10_000;

/// DOM node id to the component path enclosing it (root first, nearest
/// component last).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomComponentMap {
    paths: HashMap<u64, Vec<String>>,
}

impl DomComponentMap {
    /// Full enclosing path, if the node sits under any component.
    pub fn path(&self, dom_node: u64) -> Option<&[String]> {
        self.paths.get(&dom_node).map(Vec::as_slice)
    }

    /// Nearest enclosing component name.
    pub fn nearest(&self, dom_node: u64) -> Option<&str> {
        self.path(dom_node)
            .and_then(|path| path.last())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub(crate) fn insert(&mut self, dom_node: u64, path: Vec<String>) {
        self.paths.insert(dom_node, path);
    }
}

/// Output of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMap {
    /// Every visited record in depth-first order.
    pub components: Vec<ComponentNode>,
    pub dom: DomComponentMap,
    /// The cap cut the walk short.
    pub truncated: bool,
}

impl ComponentMap {
    /// Number of non-host components.
    pub fn component_count(&self) -> usize {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Component)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ComponentMapBuilder {
    max_components: usize,
}

impl Default for ComponentMapBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMPONENTS)
    }
}

impl ComponentMapBuilder {
    pub fn new(max_components: usize) -> Self {
        Self { max_components }
    }

    pub fn build(&self, fibers: &[FiberRecord]) -> ComponentMap {
        let mut map = ComponentMap::default();
        if fibers.is_empty() {
            return map;
        }

        let by_id: HashMap<u64, &FiberRecord> = fibers.iter().map(|f| (f.id, f)).collect();

        let mut roots = Vec::new();
        let mut children: HashMap<u64, Vec<u64>> = HashMap::new();
        for fiber in fibers {
            match fiber.parent {
                Some(parent) if parent != fiber.id && by_id.contains_key(&parent) => {
                    children.entry(parent).or_default().push(fiber.id);
                }
                Some(parent) if parent != fiber.id => {
                    warn!("Fiber {} has unknown parent {}, treating as root", fiber.id, parent);
                    roots.push(fiber.id);
                }
                Some(_) => {
                    warn!("Fiber {} is its own parent, treating as root", fiber.id);
                    roots.push(fiber.id);
                }
                None => roots.push(fiber.id),
            }
        }

        // Stack of (record id, enclosing component path). Pushed in reverse
        // so siblings come out in snapshot order.
        let mut stack: Vec<(u64, Vec<String>)> =
            roots.iter().rev().map(|id| (*id, Vec::new())).collect();
        let mut visited: HashSet<u64> = HashSet::new();

        while let Some((id, enclosing)) = stack.pop() {
            if !visited.insert(id) {
                warn!("Fiber record {} reached twice, skipping", id);
                continue;
            }
            let Some(fiber) = by_id.get(&id) else {
                continue;
            };

            if map.components.len() >= self.max_components {
                warn!(
                    "Component tree exceeds {} records, truncating",
                    self.max_components
                );
                map.truncated = true;
                break;
            }

            let label = fiber.label().to_string();
            let mut path = enclosing.clone();
            path.push(label);

            let inherited = match fiber.kind {
                ComponentKind::Component => path.clone(),
                ComponentKind::Host => {
                    if let Some(dom_node) = fiber.dom_node {
                        if !enclosing.is_empty() {
                            map.dom.insert(dom_node, enclosing.clone());
                        }
                    }
                    enclosing
                }
            };

            map.components.push(ComponentNode {
                name: fiber.name.clone(),
                kind: fiber.kind,
                display_name: fiber.display_name.clone().filter(|d| !d.is_empty()),
                path,
            });

            if let Some(kids) = children.get(&id) {
                for child in kids.iter().rev() {
                    stack.push((*child, inherited.clone()));
                }
            }
        }

        if !map.truncated && visited.len() < by_id.len() {
            warn!(
                "{} fiber records unreachable from any root (cyclic parents)",
                by_id.len() - visited.len()
            );
        }

        debug!(
            "Built component map: {} records, {} DOM nodes mapped",
            map.components.len(),
            map.dom.len()
        );
        map
    }
}

#[cfg(test)]
#[path = "component_map_tests.rs"]
mod tests;
