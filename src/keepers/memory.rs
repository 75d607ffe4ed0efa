// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::Zero as _;

use super::{
    BONDED_POOL, BankKeeper, KeeperError, MINT_MODULE, MintKeeper, NOT_BONDED_POOL,
    SlashingKeeper, StakingKeeper, UpgradeKeeper, Validator,
};
use crate::shim::address::{AccAddress, ConsAddress, ValAddress};
use crate::shim::econ::Coin;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SigningInfo {
    tombstoned: bool,
}

/// In-memory chain state implementing every keeper trait.
///
/// Cloning is cheap enough for test-sized state and gives the upgrade
/// machinery its cache branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    balances: BTreeMap<(AccAddress, String), BigUint>,
    module_balances: BTreeMap<(String, String), BigUint>,
    supply: BTreeMap<String, BigUint>,
    validators: BTreeMap<ValAddress, Validator>,
    delegations: BTreeMap<(AccAddress, ValAddress), BigUint>,
    signing_infos: BTreeMap<ConsAddress, SigningInfo>,
    done_upgrades: BTreeMap<String, i64>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits a genesis balance, growing the supply accordingly.
    pub fn fund_account(&mut self, address: &AccAddress, coin: &Coin) {
        *self
            .balances
            .entry((address.clone(), coin.denom.clone()))
            .or_default() += &coin.amount;
        *self.supply.entry(coin.denom.clone()).or_default() += &coin.amount;
    }

    pub fn add_validator(&mut self, validator: Validator) {
        self.signing_infos
            .entry(validator.consensus.clone())
            .or_default();
        self.validators.insert(validator.operator.clone(), validator);
    }

    /// Jails and tombstones `operator`, burning `slash_fraction_percent` of its
    /// tokens the way a double-sign slash does. The remaining stake moves to
    /// the not-bonded pool. Nothing changes if any step would fail.
    pub fn tombstone(
        &mut self,
        operator: &ValAddress,
        slash_fraction_percent: u32,
        denom: &str,
    ) -> Result<(), KeeperError> {
        if slash_fraction_percent > 100 {
            return Err(KeeperError::InvalidSlashFraction(slash_fraction_percent));
        }
        let validator = self
            .validators
            .get(operator)
            .ok_or_else(|| KeeperError::ValidatorNotFound(operator.clone()))?;
        let burned = &validator.tokens * slash_fraction_percent / 100u32;
        let remaining = &validator.tokens - &burned;
        let pool = validator.pool();
        let consensus = validator.consensus.clone();

        // A bonded validator's whole stake leaves the bonded pool.
        let required = if pool == BONDED_POOL {
            validator.tokens.clone()
        } else {
            burned.clone()
        };
        let available = self.module_balance(pool, denom);
        if available < required {
            return Err(KeeperError::InsufficientFunds {
                holder: pool.to_owned(),
                denom: denom.to_owned(),
                available,
                required,
            });
        }

        self.debit_module(pool, denom, &burned)?;
        if pool == BONDED_POOL {
            self.debit_module(BONDED_POOL, denom, &remaining)?;
            self.credit_module(NOT_BONDED_POOL, denom, &remaining);
        }
        if let Some(supply) = self.supply.get_mut(denom) {
            *supply -= &burned;
        }
        if let Some(validator) = self.validators.get_mut(operator) {
            validator.tokens = remaining;
            validator.jailed = true;
            validator.bonded = false;
        }
        self.signing_infos.entry(consensus).or_default().tombstoned = true;
        Ok(())
    }

    fn credit_module(&mut self, module: &str, denom: &str, amount: &BigUint) {
        *self
            .module_balances
            .entry((module.to_owned(), denom.to_owned()))
            .or_default() += amount;
    }

    fn debit_module(
        &mut self,
        module: &str,
        denom: &str,
        amount: &BigUint,
    ) -> Result<(), KeeperError> {
        let key = (module.to_owned(), denom.to_owned());
        let available = self.module_balances.get(&key).cloned().unwrap_or_default();
        if &available < amount {
            return Err(KeeperError::InsufficientFunds {
                holder: module.to_owned(),
                denom: denom.to_owned(),
                available,
                required: amount.clone(),
            });
        }
        self.module_balances.insert(key, available - amount);
        Ok(())
    }
}

impl BankKeeper for MemoryState {
    fn balance(&self, address: &AccAddress, denom: &str) -> BigUint {
        self.balances
            .get(&(address.clone(), denom.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    fn module_balance(&self, module: &str, denom: &str) -> BigUint {
        self.module_balances
            .get(&(module.to_owned(), denom.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        recipient: &AccAddress,
        coin: &Coin,
    ) -> Result<(), KeeperError> {
        self.debit_module(module, &coin.denom, &coin.amount)?;
        *self
            .balances
            .entry((recipient.clone(), coin.denom.clone()))
            .or_default() += &coin.amount;
        Ok(())
    }
}

impl MintKeeper for MemoryState {
    fn mint_coins(&mut self, coin: &Coin) -> Result<(), KeeperError> {
        self.credit_module(MINT_MODULE, &coin.denom, &coin.amount);
        *self.supply.entry(coin.denom.clone()).or_default() += &coin.amount;
        Ok(())
    }

    fn supply(&self, denom: &str) -> BigUint {
        self.supply.get(denom).cloned().unwrap_or_default()
    }
}

impl StakingKeeper for MemoryState {
    fn validator(&self, operator: &ValAddress) -> Option<Validator> {
        self.validators.get(operator).cloned()
    }

    fn delegation_shares(&self, delegator: &AccAddress, operator: &ValAddress) -> BigUint {
        self.delegations
            .get(&(delegator.clone(), operator.clone()))
            .cloned()
            .unwrap_or_default()
    }

    fn delegate(
        &mut self,
        delegator: &AccAddress,
        coin: &Coin,
        operator: &ValAddress,
    ) -> Result<BigUint, KeeperError> {
        if coin.amount.is_zero() {
            return Err(KeeperError::InvalidDelegationAmount);
        }
        let validator = self
            .validators
            .get(operator)
            .ok_or_else(|| KeeperError::ValidatorNotFound(operator.clone()))?;
        let shares = validator.shares_from_tokens(&coin.amount)?;
        let pool = validator.pool();

        let key = (delegator.clone(), coin.denom.clone());
        let available = self.balances.get(&key).cloned().unwrap_or_default();
        if available < coin.amount {
            return Err(KeeperError::InsufficientFunds {
                holder: delegator.to_string(),
                denom: coin.denom.clone(),
                available,
                required: coin.amount.clone(),
            });
        }
        self.balances.insert(key, available - &coin.amount);
        self.credit_module(pool, &coin.denom, &coin.amount);

        if let Some(validator) = self.validators.get_mut(operator) {
            validator.tokens += &coin.amount;
            validator.delegator_shares += &shares;
        }
        *self
            .delegations
            .entry((delegator.clone(), operator.clone()))
            .or_default() += &shares;
        Ok(shares)
    }
}

impl SlashingKeeper for MemoryState {
    fn is_tombstoned(&self, consensus: &ConsAddress) -> bool {
        self.signing_infos
            .get(consensus)
            .is_some_and(|info| info.tombstoned)
    }

    fn revert_tombstone(&mut self, consensus: &ConsAddress) -> Result<(), KeeperError> {
        let info = self
            .signing_infos
            .get_mut(consensus)
            .ok_or_else(|| KeeperError::SigningInfoNotFound(consensus.clone()))?;
        if !info.tombstoned {
            return Err(KeeperError::NotTombstoned(consensus.clone()));
        }
        info.tombstoned = false;
        Ok(())
    }

    fn unjail(&mut self, operator: &ValAddress) -> Result<(), KeeperError> {
        let validator = self
            .validators
            .get(operator)
            .ok_or_else(|| KeeperError::ValidatorNotFound(operator.clone()))?;
        if !validator.jailed {
            return Err(KeeperError::ValidatorNotJailed(operator.clone()));
        }
        if self.is_tombstoned(&validator.consensus) {
            return Err(KeeperError::ValidatorTombstoned(operator.clone()));
        }
        if let Some(validator) = self.validators.get_mut(operator) {
            validator.jailed = false;
        }
        Ok(())
    }
}

impl UpgradeKeeper for MemoryState {
    fn done_height(&self, name: &str) -> Option<i64> {
        self.done_upgrades.get(name).copied()
    }

    fn set_done(&mut self, name: &str, height: i64) {
        self.done_upgrades.insert(name.to_owned(), height);
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use num_traits::Zero as _;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::shim::econ::DEFAULT_DENOM;

    const DELEGATOR: &str = "secret1qyqszqgpqyqszqgpqyqszqgpqyqszqgpsk4hsq";
    const VALOPER: &str = "secretvaloper1pyysjzgfpyysjzgfpyysjzgfpyysjzgfwewm7v";
    const VALCONS: &str = "secretvalcons1pyysjzgfpyysjzgfpyysjzgfpyysjzgf62a8jd";

    fn uscrt(amount: u64) -> Coin {
        Coin::new(DEFAULT_DENOM, BigUint::from(amount))
    }

    fn state_with_validator(stake: u64) -> (MemoryState, AccAddress, ValAddress) {
        let delegator = AccAddress::from_str(DELEGATOR).unwrap();
        let operator = ValAddress::from_str(VALOPER).unwrap();
        let mut state = MemoryState::new();
        state.add_validator(Validator::new(
            operator.clone(),
            ConsAddress::from_str(VALCONS).unwrap(),
        ));
        state.fund_account(&delegator, &uscrt(stake));
        state.delegate(&delegator, &uscrt(stake), &operator).unwrap();
        (state, delegator, operator)
    }

    #[test]
    fn mint_then_send() {
        let recipient = AccAddress::from_str(DELEGATOR).unwrap();
        let mut state = MemoryState::new();
        state.mint_coins(&uscrt(100)).unwrap();
        assert_eq!(state.module_balance(MINT_MODULE, DEFAULT_DENOM), BigUint::from(100u8));
        state
            .send_coins_from_module_to_account(MINT_MODULE, &recipient, &uscrt(60))
            .unwrap();
        assert_eq!(state.balance(&recipient, DEFAULT_DENOM), BigUint::from(60u8));
        assert_eq!(state.supply(DEFAULT_DENOM), BigUint::from(100u8));

        let err = state
            .send_coins_from_module_to_account(MINT_MODULE, &recipient, &uscrt(41))
            .unwrap_err();
        assert!(matches!(err, KeeperError::InsufficientFunds { .. }));
    }

    #[test]
    fn tombstone_burns_and_jails() {
        let (mut state, _, operator) = state_with_validator(1_000);
        state.tombstone(&operator, 5, DEFAULT_DENOM).unwrap();

        let validator = state.validator(&operator).unwrap();
        assert!(validator.jailed);
        assert!(!validator.bonded);
        assert_eq!(validator.tokens, BigUint::from(950u32));
        assert_eq!(validator.delegator_shares, BigUint::from(1_000u32));
        assert!(state.is_tombstoned(&validator.consensus));
        assert_eq!(state.supply(DEFAULT_DENOM), BigUint::from(950u32));
    }

    #[test]
    fn tombstone_rejects_slash_above_100_percent() {
        let (mut state, _, operator) = state_with_validator(1_000);
        let before = state.clone();
        assert_eq!(
            state.tombstone(&operator, 150, DEFAULT_DENOM),
            Err(KeeperError::InvalidSlashFraction(150))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn failed_tombstone_changes_nothing() {
        let (mut state, _, operator) = state_with_validator(1_000);
        state.tombstone(&operator, 5, DEFAULT_DENOM).unwrap();
        let before = state.clone();

        // No `uatom` was ever bonded, so the slash cannot be paid.
        assert!(matches!(
            state.tombstone(&operator, 5, "uatom"),
            Err(KeeperError::InsufficientFunds { .. })
        ));
        assert_eq!(state, before);
        assert_eq!(
            state.validator(&operator).unwrap().tokens,
            BigUint::from(950u32)
        );
    }

    #[test]
    fn full_slash_empties_the_validator() {
        let (mut state, _, operator) = state_with_validator(1_000);
        state.tombstone(&operator, 100, DEFAULT_DENOM).unwrap();
        assert_eq!(state.validator(&operator).unwrap().tokens, BigUint::zero());
        assert_eq!(state.supply(DEFAULT_DENOM), BigUint::zero());
        assert_eq!(state.module_balance(NOT_BONDED_POOL, DEFAULT_DENOM), BigUint::zero());
    }

    #[test]
    fn delegating_to_a_slashed_validator_issues_more_shares() {
        let (mut state, delegator, operator) = state_with_validator(1_000);
        state.tombstone(&operator, 5, DEFAULT_DENOM).unwrap();
        state.fund_account(&delegator, &uscrt(95));

        let shares = state.delegate(&delegator, &uscrt(95), &operator).unwrap();
        assert_eq!(shares, BigUint::from(100u32));
        assert_eq!(
            state.delegation_shares(&delegator, &operator),
            BigUint::from(1_100u32)
        );
        assert_eq!(
            state.module_balance(NOT_BONDED_POOL, DEFAULT_DENOM),
            BigUint::from(1_045u32)
        );
        assert_eq!(state.module_balance(BONDED_POOL, DEFAULT_DENOM), BigUint::zero());
    }

    #[test]
    fn delegate_rejects_zero_and_overdraft() {
        let (mut state, delegator, operator) = state_with_validator(10);
        assert_eq!(
            state.delegate(&delegator, &uscrt(0), &operator),
            Err(KeeperError::InvalidDelegationAmount)
        );
        assert!(matches!(
            state.delegate(&delegator, &uscrt(1), &operator),
            Err(KeeperError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn unjail_requires_reverted_tombstone() {
        let (mut state, _, operator) = state_with_validator(10);
        let consensus = ConsAddress::from_str(VALCONS).unwrap();
        assert_eq!(
            state.unjail(&operator),
            Err(KeeperError::ValidatorNotJailed(operator.clone()))
        );
        assert_eq!(
            state.revert_tombstone(&consensus),
            Err(KeeperError::NotTombstoned(consensus.clone()))
        );

        state.tombstone(&operator, 5, DEFAULT_DENOM).unwrap();
        assert_eq!(
            state.unjail(&operator),
            Err(KeeperError::ValidatorTombstoned(operator.clone()))
        );
        state.revert_tombstone(&consensus).unwrap();
        state.unjail(&operator).unwrap();
        assert!(!state.validator(&operator).unwrap().jailed);
    }

    #[test]
    fn done_upgrades() {
        let mut state = MemoryState::new();
        assert_eq!(state.done_height("v1.4"), None);
        state.set_done("v1.4", 5_309_200);
        assert_eq!(state.done_height("v1.4"), Some(5_309_200));
    }
}
