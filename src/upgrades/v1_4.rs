// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The `v1.4` upgrade reverses the tombstoning of the COS validator and
//! re-mints the stake its delegators lost.

use anyhow::Context as _;
use num_bigint::BigUint;
use num_traits::Zero as _;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::{UpgradeInputs, UpgradeReport};
use crate::correction_table::{CorrectionTable, ValidatedTable, ValidationConfig, validate};
use crate::keepers::{ChainState, MINT_MODULE};
use crate::networks::ChainConfig;
use crate::shim::address::{ConsAddress, ValAddress};
use crate::shim::econ::Coin;

const COS_VALIDATOR_ADDRESS: &str = "secretvaloper1hscf4cjrhzsea5an5smt4z9aezhh4sf5jjrqka";
const COS_CONSENSUS_ADDRESS: &str = "secretvalcons1hscf4cjrhzsea5an5smt4z9aezhh4sf5xpsu6u";

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct CosPatchConfig {
    pub validator_address: String,
    pub consensus_address: String,
    /// Delegate each credit back to the validator, restoring the slashed
    /// stake rather than paying it out as liquid balance.
    pub restake: bool,
}

impl CosPatchConfig {
    /// Parses the configured validator addresses under `account_prefix`.
    pub fn addresses(&self, account_prefix: &str) -> anyhow::Result<(ValAddress, ConsAddress)> {
        let operator = ValAddress::parse_with_prefix(&self.validator_address, account_prefix)
            .with_context(|| {
                format!("invalid validator address {}", self.validator_address)
            })?;
        let consensus = ConsAddress::parse_with_prefix(&self.consensus_address, account_prefix)
            .with_context(|| {
                format!("invalid consensus address {}", self.consensus_address)
            })?;
        Ok((operator, consensus))
    }
}

impl Default for CosPatchConfig {
    fn default() -> Self {
        Self {
            validator_address: COS_VALIDATOR_ADDRESS.to_owned(),
            consensus_address: COS_CONSENSUS_ADDRESS.to_owned(),
            restake: true,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CosPatchReport {
    pub validator: String,
    pub credited: usize,
    pub skipped_zero: usize,
    pub restaked: bool,
    #[serde_as(as = "DisplayFromStr")]
    pub total_minted: BigUint,
}

pub(super) fn run_upgrade<S: ChainState>(
    inputs: &UpgradeInputs<'_>,
    state: &mut S,
) -> anyhow::Result<UpgradeReport> {
    let config = inputs.config;
    revert_cos_tombstoning(
        state,
        inputs.table,
        &config.chain,
        &config.cos_patch,
        &config.validation,
    )
    .map(UpgradeReport::CosPatch)
}

/// Unjails the COS validator and credits every record of `table`.
///
/// The whole table is validated before the first keeper call. Mutations are
/// applied directly to `state`; run through [`super::apply_upgrade`] to get
/// all-or-nothing semantics.
pub fn revert_cos_tombstoning<S: ChainState>(
    state: &mut S,
    table: &CorrectionTable,
    chain: &ChainConfig,
    cos_patch: &CosPatchConfig,
    validation: &ValidationConfig,
) -> anyhow::Result<CosPatchReport> {
    let validated = match validate(table, &chain.account_prefix, validation) {
        Ok(validated) => validated,
        Err(failure) => {
            for error in &failure.errors {
                tracing::error!("{error}");
            }
            return Err(failure).context("refusing to mint from an invalid correction table");
        }
    };

    let supply = state.supply(&chain.denom);
    anyhow::ensure!(
        validated.total() <= &supply,
        "correction table mints {}{}, more than the current supply of {supply}{}",
        validated.total(),
        chain.denom,
        chain.denom
    );

    let (operator, consensus) = cos_patch.addresses(&chain.account_prefix)?;
    revert_tombstone(state, &operator, &consensus)?;
    mint_lost_tokens(state, &validated, chain, cos_patch, &operator)
}

fn revert_tombstone<S: ChainState>(
    state: &mut S,
    operator: &ValAddress,
    consensus: &ConsAddress,
) -> anyhow::Result<()> {
    let validator = state
        .validator(operator)
        .with_context(|| format!("cos validator {operator} not found"))?;
    anyhow::ensure!(
        &validator.consensus == consensus,
        "cos validator {operator} signs with {}, not {consensus}",
        validator.consensus
    );

    state.revert_tombstone(consensus)?;
    state.unjail(operator)?;
    tracing::info!("Reverted tombstone of {operator} and unjailed it");
    Ok(())
}

fn mint_lost_tokens<S: ChainState>(
    state: &mut S,
    table: &ValidatedTable,
    chain: &ChainConfig,
    cos_patch: &CosPatchConfig,
    operator: &ValAddress,
) -> anyhow::Result<CosPatchReport> {
    let mut report = CosPatchReport {
        validator: operator.to_string(),
        restaked: cos_patch.restake,
        ..Default::default()
    };

    for record in table.records() {
        if record.amount.is_zero() {
            tracing::debug!("Skipping zero credit to {}", record.address);
            report.skipped_zero += 1;
            continue;
        }
        let coin = Coin::new(&chain.denom, record.amount.clone());

        state
            .mint_coins(&coin)
            .with_context(|| format!("error minting {coin} to {}", record.address))?;
        state
            .send_coins_from_module_to_account(MINT_MODULE, &record.address, &coin)
            .with_context(|| format!("error sending minted {coin} to {}", record.address))?;
        if cos_patch.restake {
            state
                .delegate(&record.address, &coin, operator)
                .with_context(|| {
                    format!(
                        "error delegating minted {coin} from {} to {operator}",
                        record.address
                    )
                })?;
        }
        tracing::debug!("Credited {coin} to {}", record.address);

        report.credited += 1;
        report.total_minted += &record.amount;
    }

    tracing::info!(
        "Minted {}{} to {} delegators of {operator}",
        report.total_minted,
        chain.denom,
        report.credited
    );
    Ok(report)
}
