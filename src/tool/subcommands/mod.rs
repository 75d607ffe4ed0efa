// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod config_cmd;
mod table_cmd;
mod upgrade_cmd;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use crate::cli_shared::cli::{CliOpts, HELP_MESSAGE};
use crate::correction_table::CorrectionTable;
use crate::utils::version::TOOL_VERSION_STRING;

/// Command-line options for the `tombstone-revert-tool` binary
#[derive(Parser)]
#[command(name = "tombstone-revert-tool", author = env!("CARGO_PKG_AUTHORS"), version = TOOL_VERSION_STRING.as_str(), about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(help_template(HELP_MESSAGE))]
pub struct Cli {
    #[command(flatten)]
    pub opts: CliOpts,
    #[command(subcommand)]
    pub cmd: Subcommand,
}

/// tombstone-revert-tool sub-commands
#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Inspect the COS compensation table
    #[command(subcommand)]
    Table(table_cmd::TableCommands),

    /// Rehearse upgrade handlers against an in-memory chain
    #[command(subcommand)]
    Upgrade(upgrade_cmd::UpgradeCommands),

    /// Inspect the effective configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

/// Which table a command reads.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TableSource {
    /// Read the table from this JSON file instead of the compiled-in one
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl TableSource {
    pub fn load(&self) -> anyhow::Result<CorrectionTable> {
        match &self.file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                CorrectionTable::from_json(&json)
                    .with_context(|| format!("{} is not a correction table", path.display()))
            }
            None => Ok(CorrectionTable::embedded().clone()),
        }
    }
}
