// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use num_bigint::BigUint;
use thiserror::Error;

use crate::shim::address::{ConsAddress, ValAddress};

/// Failure reported by one of the chain's module keepers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeeperError {
    #[error("insufficient funds: {holder} has {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        holder: String,
        denom: String,
        available: BigUint,
        required: BigUint,
    },
    #[error("validator {0} not found")]
    ValidatorNotFound(ValAddress),
    #[error("validator {0} is not jailed")]
    ValidatorNotJailed(ValAddress),
    #[error("validator {0} is tombstoned and cannot be unjailed")]
    ValidatorTombstoned(ValAddress),
    #[error("no signing info for {0}")]
    SigningInfoNotFound(ConsAddress),
    #[error("{0} is not tombstoned")]
    NotTombstoned(ConsAddress),
    #[error("delegation amount must be positive")]
    InvalidDelegationAmount,
    #[error("slash fraction of {0}% is above 100%")]
    InvalidSlashFraction(u32),
    #[error("validator {0} has no tokens left to back its shares")]
    InvalidExchangeRate(ValAddress),
}
