//! Ledger rendering: termtree hierarchy with color-coded variance

use colored::Colorize;
use termtree::Tree;

use crate::domain::{round2, Node, TreeUpdateEngine};

pub trait LedgerDisplay {
    fn to_display_tree(&self, engine: &TreeUpdateEngine) -> Tree<String>;
}

impl LedgerDisplay for Node {
    fn to_display_tree(&self, engine: &TreeUpdateEngine) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|child| child.to_display_tree(engine))
            .collect();
        Tree::new(node_line(self, engine)).with_leaves(leaves)
    }
}

fn node_line(node: &Node, engine: &TreeUpdateEngine) -> String {
    let variance = engine.variance_of(&node.id).unwrap_or(0.0);
    let label = if node.is_parent() {
        node.label.bold().to_string()
    } else {
        node.label.clone()
    };
    format!(
        "{}  {:.2}  {}",
        label,
        round2(node.value),
        format_variance(variance)
    )
}

/// Variance display: positive green, negative red, zero dimmed.
pub fn format_variance(variance: f64) -> String {
    let text = format!("{:+.2}%", round2(variance));
    if variance > 0.0 {
        text.green().to_string()
    } else if variance < 0.0 {
        text.red().to_string()
    } else {
        text.dimmed().to_string()
    }
}

/// Print the whole ledger followed by the grand total line.
pub fn print_ledger(engine: &TreeUpdateEngine) {
    for root in engine.tree() {
        println!("{}", root.to_display_tree(engine));
    }
    println!(
        "{}  {:.2}  {}",
        "Grand Total".bold(),
        round2(engine.grand_total()),
        format_variance(engine.grand_total_variance())
    );
}
