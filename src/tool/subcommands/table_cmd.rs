// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use clap::Subcommand;
use itertools::Itertools as _;

use super::TableSource;
use crate::cli_shared::cli::Config;
use crate::correction_table::{CorrectionTable, ValidatedTable, parse_amount, validate};
use crate::shim::econ::{Coin, format_tokens};

#[derive(Debug, Subcommand)]
pub enum TableCommands {
    /// Print record count, total and amount range as JSON
    Stats {
        #[command(flatten)]
        source: TableSource,
    },
    /// Check every record, printing all problems found
    Validate {
        #[command(flatten)]
        source: TableSource,
    },
    /// Print the amount credited to an address
    Lookup {
        /// Bech32 account address, e.g. `secret1...`
        address: String,
        #[command(flatten)]
        source: TableSource,
    },
    /// Print the table as JSON
    Export {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        /// Order records by address
        #[arg(long)]
        sorted: bool,
        #[command(flatten)]
        source: TableSource,
    },
}

impl TableCommands {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Stats { source } => {
                let validated = validated(&source.load()?, config)?;
                println!("{}", serde_json::to_string_pretty(&validated.summary())?);
                Ok(())
            }
            Self::Validate { source } => {
                let validated = validated(&source.load()?, config)?;
                println!(
                    "{} records OK, {} to mint ({} SCRT)",
                    validated.len(),
                    Coin::new(&config.chain.denom, validated.total().clone()),
                    format_tokens(validated.total())
                );
                for anomaly in validated.anomalies() {
                    println!(
                        "anomaly: record {} credits {} to {}",
                        anomaly.index, anomaly.amount, anomaly.address
                    );
                }
                Ok(())
            }
            Self::Lookup { address, source } => {
                let table = source.load()?;
                let record = table
                    .get(&address)
                    .ok_or_else(|| anyhow::anyhow!("{address} is not in the correction table"))?;
                let amount = parse_amount(&record.amount).ok_or_else(|| {
                    anyhow::anyhow!("{address} has a malformed amount {:?}", record.amount)
                })?;
                println!(
                    "{} ({} SCRT)",
                    Coin::new(&config.chain.denom, amount.clone()),
                    format_tokens(&amount)
                );
                Ok(())
            }
            Self::Export {
                pretty,
                sorted,
                source,
            } => {
                let mut table = source.load()?;
                if sorted {
                    table = table.sorted();
                }
                let json = if pretty {
                    table.to_json_pretty()?
                } else {
                    table.to_json()?
                };
                println!("{json}");
                Ok(())
            }
        }
    }
}

/// Validates `table`, printing every problem to stdout on failure.
fn validated(table: &CorrectionTable, config: &Config) -> anyhow::Result<ValidatedTable> {
    validate(table, &config.chain.account_prefix, &config.validation).map_err(|failure| {
        println!("{}", failure.errors.iter().join("\n"));
        anyhow::Error::new(failure)
    })
}
