//! Domain layer: ledger tree and update engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod engine;
pub mod entities;
pub mod error;

pub use engine::{update_value, TreeUpdateEngine};
pub use entities::{find_node, round2, subtotal, variance, Node, UpdateMode};
pub use error::DomainError;
