//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, render};
use crate::config::Settings;
use crate::domain::TreeUpdateEngine;
use crate::seed::load_seed;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { file }) => show(file.as_deref()),
        Some(Commands::Apply { file, ops }) => apply(file.as_deref(), ops),
        Some(Commands::Variance { id, file, ops }) => variance(id, file.as_deref(), ops),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "rsledger", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// One update request parsed from the command line.
#[derive(Debug, PartialEq, Eq)]
enum LedgerOp<'a> {
    /// `ID=VALUE`: set the value directly
    Direct { id: &'a str, raw: &'a str },
    /// `ID%PCT`: adjust by percent of the current value
    Percent { id: &'a str, raw: &'a str },
}

fn parse_op(op: &str) -> CliResult<LedgerOp<'_>> {
    if let Some((id, raw)) = op.split_once('=') {
        return Ok(LedgerOp::Direct { id, raw });
    }
    if let Some((id, raw)) = op.split_once('%') {
        return Ok(LedgerOp::Percent { id, raw });
    }
    Err(CliError::InvalidArgs(format!(
        "invalid op '{}': expected ID=VALUE or ID%PCT",
        op
    )))
}

fn load_engine(file: Option<&Path>) -> CliResult<TreeUpdateEngine> {
    let settings = Settings::load()?;
    let path = settings.resolve_seed_file(file).ok_or_else(|| {
        CliError::Usage("no ledger file given and no seed_file configured".to_string())
    })?;
    debug!(?path, "loading ledger seed");
    let seed = load_seed(&path)?;
    Ok(TreeUpdateEngine::initialize(seed)?)
}

fn apply_ops(engine: &mut TreeUpdateEngine, ops: &[String]) -> CliResult<()> {
    for op in ops {
        let applied = match parse_op(op)? {
            LedgerOp::Direct { id, raw } => engine.resolve_direct_input(id, raw),
            LedgerOp::Percent { id, raw } => engine.resolve_percent_input(id, raw),
        };
        if !applied {
            // Soft-fail: unknown id or unparsable number skips the op.
            output::warning(&format!("skipping '{}': unknown id or unparsable number", op));
        }
    }
    Ok(())
}

#[instrument]
fn show(file: Option<&Path>) -> CliResult<()> {
    let engine = load_engine(file)?;
    render::print_ledger(&engine);
    Ok(())
}

#[instrument]
fn apply(file: Option<&Path>, ops: &[String]) -> CliResult<()> {
    let mut engine = load_engine(file)?;
    apply_ops(&mut engine, ops)?;
    render::print_ledger(&engine);
    Ok(())
}

#[instrument]
fn variance(id: &str, file: Option<&Path>, ops: &[String]) -> CliResult<()> {
    let mut engine = load_engine(file)?;
    apply_ops(&mut engine, ops)?;
    let variance = engine
        .variance_of(id)
        .ok_or_else(|| CliError::InvalidArgs(format!("unknown node id: {}", id)))?;
    output::info(&render::format_variance(variance));
    Ok(())
}
