//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Hierarchical numeric ledger: proportional tree updates with baseline variance tracking
#[derive(Parser, Debug)]
#[command(name = "rsledger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase debug output (-d: info, -d -d: debug, -d -d -d: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the ledger tree
    Show {
        /// Ledger seed file (TOML); falls back to configured seed_file
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Apply updates in order, then show the result with variance
    Apply {
        /// Ledger seed file (TOML); falls back to configured seed_file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Updates: `ID=VALUE` sets a value directly, `ID%PCT` adjusts by percent
        #[arg(required = true, value_name = "OP")]
        ops: Vec<String>,
    },

    /// Show variance of a single node against the baseline
    Variance {
        /// Node id
        id: String,

        /// Ledger seed file (TOML); falls back to configured seed_file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Updates to apply before reading the variance
        #[arg(value_name = "OP")]
        ops: Vec<String>,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
