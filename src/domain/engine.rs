//! Tree update engine: proportional redistribution and baseline variance
//!
//! The engine owns two forests: the live tree and a baseline snapshot taken
//! once at initialization. Updates never mutate a tree in place; each call
//! produces a replacement forest, so previously cloned trees stay valid
//! snapshots. Execution is single-threaded and synchronous; callers in a
//! multi-actor setting must serialize updates per engine instance.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, instrument};

use crate::domain::entities::{find_node, round2, subtotal, variance, Node, UpdateMode};
use crate::domain::error::DomainError;

/// Applies a value update to the node identified by `id` and propagates the
/// effect through the forest, returning a new forest.
///
/// - A matched node with children gets the target value and pushes it down
///   proportionally to the children's prior shares (same behavior for both
///   modes). A child that is itself a parent cascades the push-down into its
///   own subtree, so subtotal consistency holds at every depth.
/// - A matched leaf takes the rounded target directly.
/// - Every ancestor of a changed node gets its subtotal recomputed.
/// - An id that matches nothing leaves the forest unchanged.
#[instrument(level = "debug", skip(nodes))]
pub fn update_value(nodes: &[Node], id: &str, new_value: f64, mode: UpdateMode) -> Vec<Node> {
    let (updated, changed) = update_nodes(nodes, id, new_value, mode);
    if !changed {
        debug!(id, "no node matched, forest unchanged");
    }
    updated
}

fn update_nodes(nodes: &[Node], id: &str, new_value: f64, mode: UpdateMode) -> (Vec<Node>, bool) {
    let mut changed = false;
    let updated = nodes
        .iter()
        .map(|node| {
            if node.id == id {
                changed = true;
                return redistribute(node, new_value);
            }
            if node.children.is_empty() {
                return node.clone();
            }
            let (children, child_changed) = update_nodes(&node.children, id, new_value, mode);
            if child_changed {
                changed = true;
                Node {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    value: round2(subtotal(&children)),
                    children,
                }
            } else {
                node.clone()
            }
        })
        .collect();
    (updated, changed)
}

/// Set a node to `target`, distributing the value across children in
/// proportion to their prior shares.
///
/// A zero prior subtotal zeroes every child: the prior proportions carry no
/// information to distribute against.
fn redistribute(node: &Node, target: f64) -> Node {
    if node.children.is_empty() {
        return Node {
            id: node.id.clone(),
            label: node.label.clone(),
            value: round2(target),
            children: Vec::new(),
        };
    }
    let old_subtotal = subtotal(&node.children);
    let children = node
        .children
        .iter()
        .map(|child| {
            let share = if old_subtotal > 0.0 {
                round2(child.value / old_subtotal * target)
            } else {
                0.0
            };
            redistribute(child, share)
        })
        .collect();
    Node {
        id: node.id.clone(),
        label: node.label.clone(),
        value: round2(target),
        children,
    }
}

/// Hierarchical ledger state: live tree, immutable baseline, and pending raw
/// inputs keyed by node id.
#[derive(Debug, Clone)]
pub struct TreeUpdateEngine {
    tree: Vec<Node>,
    baseline: Vec<Node>,
    pending: BTreeMap<String, String>,
}

impl TreeUpdateEngine {
    /// Create an engine from a caller-supplied seed forest.
    ///
    /// Validates id uniqueness and value finiteness, recomputes every
    /// parent's value as the rounded sum of its children so subtotal
    /// consistency holds from the start, then snapshots the baseline.
    #[instrument(level = "debug", skip(seed))]
    pub fn initialize(seed: Vec<Node>) -> Result<Self, DomainError> {
        let mut seen = BTreeSet::new();
        validate(&seed, &mut seen)?;
        let tree: Vec<Node> = seed.iter().map(normalize).collect();
        let baseline = tree.clone();
        debug!(roots = tree.len(), "engine initialized");
        Ok(Self {
            tree,
            baseline,
            pending: BTreeMap::new(),
        })
    }

    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    pub fn baseline(&self) -> &[Node] {
        &self.baseline
    }

    /// Apply a resolved update, replacing the live forest.
    #[instrument(level = "debug", skip(self))]
    pub fn update_value(&mut self, id: &str, new_value: f64, mode: UpdateMode) {
        self.tree = update_value(&self.tree, id, new_value, mode);
    }

    /// Record raw input text for a node, e.g. from an input widget.
    pub fn set_pending_input(&mut self, id: impl Into<String>, raw: impl Into<String>) {
        self.pending.insert(id.into(), raw.into());
    }

    pub fn pending_input(&self, id: &str) -> Option<&str> {
        self.pending.get(id).map(String::as_str)
    }

    /// Resolve raw percent text against the node's current value and apply
    /// the resulting target. Unparsable or non-finite input, or an unknown
    /// id, is a no-op returning false. On success the pending input for the
    /// id is cleared.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_percent_input(&mut self, id: &str, raw: &str) -> bool {
        let Some(pct) = parse_finite(raw) else {
            debug!(id, raw, "unparsable percent input ignored");
            return false;
        };
        let Some(current) = find_node(&self.tree, id).map(|node| node.value) else {
            debug!(id, "unknown node id, percent input ignored");
            return false;
        };
        let target = current * (1.0 + pct / 100.0);
        self.update_value(id, target, UpdateMode::Percentage);
        self.pending.remove(id);
        true
    }

    /// Resolve raw absolute-value text and apply it as a direct update.
    /// Unparsable or non-finite input, or an unknown id, is a no-op
    /// returning false. On success the pending input for the id is cleared.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_direct_input(&mut self, id: &str, raw: &str) -> bool {
        let Some(target) = parse_finite(raw) else {
            debug!(id, raw, "unparsable value input ignored");
            return false;
        };
        if find_node(&self.tree, id).is_none() {
            debug!(id, "unknown node id, value input ignored");
            return false;
        }
        self.update_value(id, target, UpdateMode::Direct);
        self.pending.remove(id);
        true
    }

    /// Percentage change of a node's live value against its baseline value.
    pub fn variance_of(&self, id: &str) -> Option<f64> {
        let current = find_node(&self.tree, id)?.value;
        let original = find_node(&self.baseline, id)?.value;
        Some(variance(current, original))
    }

    pub fn grand_total(&self) -> f64 {
        subtotal(&self.tree)
    }

    pub fn baseline_grand_total(&self) -> f64 {
        subtotal(&self.baseline)
    }

    pub fn grand_total_variance(&self) -> f64 {
        variance(self.grand_total(), self.baseline_grand_total())
    }
}

fn validate(nodes: &[Node], seen: &mut BTreeSet<String>) -> Result<(), DomainError> {
    for node in nodes {
        if !seen.insert(node.id.clone()) {
            return Err(DomainError::DuplicateId(node.id.clone()));
        }
        if !node.value.is_finite() {
            return Err(DomainError::NonFiniteValue(node.id.clone()));
        }
        validate(&node.children, seen)?;
    }
    Ok(())
}

/// Rebuild a node with every parent value derived bottom-up from its
/// children and every stored value rounded to ledger precision.
fn normalize(node: &Node) -> Node {
    if node.children.is_empty() {
        return Node {
            id: node.id.clone(),
            label: node.label.clone(),
            value: round2(node.value),
            children: Vec::new(),
        };
    }
    let children: Vec<Node> = node.children.iter().map(normalize).collect();
    Node {
        id: node.id.clone(),
        label: node.label.clone(),
        value: round2(subtotal(&children)),
        children,
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
