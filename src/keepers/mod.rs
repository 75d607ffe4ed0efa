// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Seams to the chain modules an upgrade handler mutates.
//!
//! The traits mirror the subset of the Cosmos SDK bank, mint, staking,
//! slashing and upgrade keepers needed to reverse a tombstoning. A node wires
//! in its own stores; [`MemoryState`] backs the tests and the simulation tool.

mod errors;
mod memory;

pub use errors::KeeperError;
pub use memory::MemoryState;

use num_bigint::BigUint;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::shim::address::{AccAddress, ConsAddress, ValAddress};
use crate::shim::econ::Coin;

/// Module account credited by [`MintKeeper::mint_coins`].
pub const MINT_MODULE: &str = "mint";
/// Holds the stake of validators in the active set.
pub const BONDED_POOL: &str = "bonded_tokens_pool";
/// Holds the stake of jailed, unbonding or otherwise inactive validators.
pub const NOT_BONDED_POOL: &str = "not_bonded_tokens_pool";

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validator {
    pub operator: ValAddress,
    pub consensus: ConsAddress,
    pub jailed: bool,
    pub bonded: bool,
    #[serde_as(as = "DisplayFromStr")]
    pub tokens: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    pub delegator_shares: BigUint,
}

impl Validator {
    pub fn new(operator: ValAddress, consensus: ConsAddress) -> Self {
        Self {
            operator,
            consensus,
            jailed: false,
            bonded: true,
            tokens: BigUint::default(),
            delegator_shares: BigUint::default(),
        }
    }

    /// Shares issued for `amount` tokens at the current exchange rate.
    /// Slashing burns tokens but not shares, so a slashed validator issues
    /// more shares per token.
    pub fn shares_from_tokens(&self, amount: &BigUint) -> Result<BigUint, KeeperError> {
        if self.delegator_shares == BigUint::default() {
            return Ok(amount.clone());
        }
        if self.tokens == BigUint::default() {
            return Err(KeeperError::InvalidExchangeRate(self.operator.clone()));
        }
        Ok(amount * &self.delegator_shares / &self.tokens)
    }

    pub fn pool(&self) -> &'static str {
        if self.bonded {
            BONDED_POOL
        } else {
            NOT_BONDED_POOL
        }
    }
}

pub trait BankKeeper {
    fn balance(&self, address: &AccAddress, denom: &str) -> BigUint;

    fn module_balance(&self, module: &str, denom: &str) -> BigUint;

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        recipient: &AccAddress,
        coin: &Coin,
    ) -> Result<(), KeeperError>;
}

pub trait MintKeeper {
    /// Creates `coin` out of thin air into the [`MINT_MODULE`] account.
    fn mint_coins(&mut self, coin: &Coin) -> Result<(), KeeperError>;

    fn supply(&self, denom: &str) -> BigUint;
}

pub trait StakingKeeper {
    fn validator(&self, operator: &ValAddress) -> Option<Validator>;

    fn delegation_shares(&self, delegator: &AccAddress, operator: &ValAddress) -> BigUint;

    /// Moves `coin` from the delegator's balance into the validator's pool,
    /// returning the shares issued.
    fn delegate(
        &mut self,
        delegator: &AccAddress,
        coin: &Coin,
        operator: &ValAddress,
    ) -> Result<BigUint, KeeperError>;
}

pub trait SlashingKeeper {
    fn is_tombstoned(&self, consensus: &ConsAddress) -> bool;

    fn revert_tombstone(&mut self, consensus: &ConsAddress) -> Result<(), KeeperError>;

    fn unjail(&mut self, operator: &ValAddress) -> Result<(), KeeperError>;
}

pub trait UpgradeKeeper {
    /// Height at which the named upgrade was applied, if it was.
    fn done_height(&self, name: &str) -> Option<i64>;

    fn set_done(&mut self, name: &str, height: i64);
}

/// Everything an upgrade handler may touch. `Clone` provides the cache branch
/// that lets a failing upgrade leave the state untouched.
pub trait ChainState:
    BankKeeper + MintKeeper + StakingKeeper + SlashingKeeper + UpgradeKeeper + Clone
{
}

impl<T> ChainState for T where
    T: BankKeeper + MintKeeper + StakingKeeper + SlashingKeeper + UpgradeKeeper + Clone
{
}
