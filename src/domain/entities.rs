//! Domain entities: ledger nodes and value arithmetic

use serde::{Deserialize, Serialize};

/// A labeled entry in the ledger hierarchy.
///
/// A node with children is a parent: its value is the rounded sum of its
/// children's values. A node without children is a leaf: its value is
/// authoritative and only changes via a direct update to that node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier across the whole forest
    pub id: String,
    /// Human-readable name
    pub label: String,
    /// Current numeric value
    pub value: f64,
    /// Child nodes, ordered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            children: Vec::new(),
        }
    }

    /// Build a parent node whose value is derived from its children.
    pub fn parent(id: impl Into<String>, label: impl Into<String>, children: Vec<Node>) -> Self {
        let value = round2(subtotal(&children));
        Self {
            id: id.into(),
            label: label.into(),
            value,
            children,
        }
    }

    pub fn is_parent(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// How an update target was produced at the input boundary.
///
/// Both modes carry an already-resolved absolute target value; the percent
/// conversion happens before the engine is invoked. The engine treats them
/// identically for redistribution purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Target derived from `current * (1 + pct/100)`
    Percentage,
    /// Target given as an explicit absolute value
    Direct,
}

/// Round to two decimal places, the ledger's storage precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of the direct children's values (unrounded).
pub fn subtotal(children: &[Node]) -> f64 {
    children.iter().map(|child| child.value).sum()
}

/// Percentage change of `current` relative to `original`.
///
/// A zero original yields 0 rather than a division fault.
pub fn variance(current: f64, original: f64) -> f64 {
    if original == 0.0 {
        0.0
    } else {
        (current - original) / original * 100.0
    }
}

/// Depth-first search for a node by id across the forest.
pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}
