// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;
use clap::Subcommand;
use num_bigint::BigUint;

use super::TableSource;
use crate::cli_shared::cli::Config;
use crate::keepers::{MemoryState, StakingKeeper as _, Validator};
use crate::networks::Height;
use crate::shim::address::AccAddress;
use crate::shim::econ::{Coin, UNITS_PER_TOKEN};
use crate::upgrades::{Plan, UpgradeInputs, UpgradeOutcome, apply_upgrade};

/// Self-delegation of the simulated validator, in whole tokens.
const SIMULATED_STAKE_TOKENS: u64 = 10_000_000;
/// Double-sign slash fraction on Secret Network.
const SLASH_PERCENT: u32 = 5;

#[derive(Debug, Subcommand)]
pub enum UpgradeCommands {
    /// Apply `v1.4` to a fresh chain where the COS validator is jailed and
    /// tombstoned, then apply it again to show the second run is a no-op
    Simulate {
        /// Block height of the upgrade plan. Defaults to the height scheduled
        /// for the configured network
        #[arg(long)]
        height: Option<i64>,
        /// Pay credits out as liquid balance instead of delegating them
        #[arg(long)]
        no_restake: bool,
        #[command(flatten)]
        source: TableSource,
    },
}

impl UpgradeCommands {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Simulate {
                height,
                no_restake,
                source,
            } => {
                let mut config = config.clone();
                if no_restake {
                    config.cos_patch.restake = false;
                }
                let block = match height {
                    Some(height) => height,
                    None => config.chain.block(Height::V1_4).with_context(|| {
                        format!(
                            "no {} height is scheduled for {}, pass --height",
                            Height::V1_4,
                            config.chain.network
                        )
                    })?,
                };
                let table = source.load()?;
                let inputs = UpgradeInputs {
                    config: &config,
                    table: &table,
                };
                let plan = Plan::new(Height::V1_4, block);

                let mut state = tombstoned_chain(&config)?;
                let first = apply_upgrade(&plan, &inputs, &mut state)?;
                let second = apply_upgrade(&plan, &inputs, &mut state)?;
                anyhow::ensure!(
                    matches!(second, UpgradeOutcome::AlreadyApplied { .. }),
                    "second application of {} was not a no-op",
                    plan.name
                );

                let (operator, _) = config.cos_patch.addresses(&config.chain.account_prefix)?;
                let validator = state
                    .validator(&operator)
                    .with_context(|| format!("validator {operator} disappeared"))?;
                let output = serde_json::json!({
                    "plan": plan,
                    "first": first,
                    "second": second,
                    "validator": validator,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(())
            }
        }
    }
}

/// Chain where the configured validator self-delegated, then double-signed
/// and was tombstoned.
fn tombstoned_chain(config: &Config) -> anyhow::Result<MemoryState> {
    let prefix = &config.chain.account_prefix;
    let (operator, consensus) = config.cos_patch.addresses(prefix)?;
    let self_delegator = AccAddress::from_bytes(prefix, *operator.as_bytes());
    let stake = Coin::new(
        &config.chain.denom,
        BigUint::from(SIMULATED_STAKE_TOKENS) * UNITS_PER_TOKEN,
    );

    let mut state = MemoryState::new();
    state.add_validator(Validator::new(operator.clone(), consensus));
    state.fund_account(&self_delegator, &stake);
    state
        .delegate(&self_delegator, &stake, &operator)
        .context("error bonding the simulated self-delegation")?;
    state
        .tombstone(&operator, SLASH_PERCENT, &config.chain.denom)
        .context("error tombstoning the simulated validator")?;
    Ok(state)
}
