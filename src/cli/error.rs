//! CLI-level errors (wraps domain and seed errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::seed::SeedError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Seed(#[from] SeedError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Seed(SeedError::Io { .. }) => crate::exitcode::NOINPUT,
            CliError::Seed(SeedError::Parse { .. }) => crate::exitcode::DATAERR,
            CliError::Domain(_) => crate::exitcode::DATAERR,
            CliError::Config(_) => crate::exitcode::CONFIG,
        }
    }
}
