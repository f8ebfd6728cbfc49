//! Component tree types.

use serde::{Deserialize, Serialize};

/// Whether a render-tree node renders a DOM element or is a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Host,
    Component,
}

/// A component discovered while walking the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub name: String,
    pub kind: ComponentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Enclosing component names, root first, this node last.
    pub path: Vec<String>,
}

/// One render-tree node as captured in the page.
///
/// The bundle flattens the fiber tree into records linked by `parent`;
/// host records carry the id of the DOM element they render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiberRecord {
    pub id: u64,
    #[serde(default)]
    pub parent: Option<u64>,
    pub kind: ComponentKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub dom_node: Option<u64>,
}

impl FiberRecord {
    /// Name shown to users: display name when set, else the type name.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.name,
        }
    }
}
