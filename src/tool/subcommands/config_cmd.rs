// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write as _;

use clap::Subcommand;

use crate::cli_shared::cli::Config;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Dump the effective configuration as TOML
    Dump,
}

impl ConfigCommands {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Dump => {
                let toml = toml::to_string_pretty(config)?;
                std::io::stdout().write_all(toml.as_bytes())?;
                Ok(())
            }
        }
    }
}
