//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsledger/rsledger.toml`
//! 3. Environment variables: `RSLEDGER_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

/// User settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Default ledger seed file, used when no FILE argument is given.
    /// `~` and `$VAR` are expanded.
    pub seed_file: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dirs) = ProjectDirs::from("", "", "rsledger") {
            let global = dirs.config_dir().join("rsledger.toml");
            builder = builder.add_source(File::from(global).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("RSLEDGER"));

        builder.build()?.try_deserialize()
    }

    /// Effective seed file: the CLI argument wins over the configured default.
    pub fn resolve_seed_file(&self, cli_file: Option<&Path>) -> Option<PathBuf> {
        cli_file
            .map(|path| PathBuf::from(expand_path(&path.to_string_lossy())))
            .or_else(|| {
                self.seed_file
                    .as_deref()
                    .map(|configured| PathBuf::from(expand_path(configured)))
            })
    }
}

/// Expand `~` and environment variables in a path string.
/// Unexpandable input passes through unchanged.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
