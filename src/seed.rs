//! Seed file loading
//!
//! Ledger seeds are TOML files with `[[node]]` tables; children nest via
//! `[[node.children]]`:
//!
//! ```toml
//! [[node]]
//! id = "electronics"
//! label = "Electronics"
//! value = 1500.0
//!
//!   [[node.children]]
//!   id = "phones"
//!   label = "Phones"
//!   value = 800.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::Node;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default, rename = "node")]
    nodes: Vec<Node>,
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type SeedResult<T> = Result<T, SeedError>;

/// Load the seed forest from a TOML file.
#[instrument(level = "debug")]
pub fn load_seed(path: &Path) -> SeedResult<Vec<Node>> {
    let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let seed: SeedFile = toml::from_str(&content).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(seed.nodes)
}
