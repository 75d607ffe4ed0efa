// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Base denomination of SCRT, 10^-6 of one token.
pub const DEFAULT_DENOM: &str = "uscrt";

/// Number of base units in one whole token.
pub const UNITS_PER_TOKEN: u64 = 1_000_000;

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: BigUint,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: BigUint) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == BigUint::default()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Renders base units as whole tokens, e.g. `1005671` as `1.005671`.
pub fn format_tokens(amount: &BigUint) -> String {
    let units = BigUint::from(UNITS_PER_TOKEN);
    let whole = amount / &units;
    let frac = amount % &units;
    format!("{whole}.{frac:0>6}")
}
