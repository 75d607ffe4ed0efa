// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use ahash::{HashMap, HashMapExt as _};
use num_bigint::BigUint;
use num_traits::Zero as _;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use thiserror::Error;

use super::CorrectionTable;
use crate::shim::address::{AccAddress, AddressError};

/// Bounds checked against the table before anything is minted.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct ValidationConfig {
    /// Upper bound on the sum of all credits, in base units. Defaults to ten
    /// million SCRT, a small fraction of mainnet supply. The upgrade handler
    /// separately refuses to mint more than the supply at upgrade time.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_total_mint: Option<BigUint>,
    /// Single credits above this are reported as anomalies but still applied.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub anomaly_threshold: Option<BigUint>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_total_mint: Some(BigUint::from(10_000_000_000_000u64)),
            anomaly_threshold: Some(BigUint::from(1_000_000_000_000u64)),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record {index}: empty {field}")]
    EmptyField { index: usize, field: &'static str },
    #[error(
        "record {index}: amount `{amount}` for {address} is not a non-negative base-10 integer of at most 256 bits"
    )]
    MalformedAmount {
        index: usize,
        address: String,
        amount: String,
    },
    #[error("record {index}: invalid address `{address}`: {reason}")]
    InvalidAddress {
        index: usize,
        address: String,
        reason: AddressError,
    },
    #[error("record {index}: address `{address}` is not in canonical form `{canonical}`")]
    NonCanonicalAddress {
        index: usize,
        address: String,
        canonical: String,
    },
    #[error("address {address} is credited twice, at records {first} and {second}")]
    DuplicateAddress {
        address: String,
        first: usize,
        second: usize,
    },
    #[error("total credit {total} exceeds the bound of {bound}")]
    TotalExceedsBound { total: BigUint, bound: BigUint },
}

#[derive(Debug, Error)]
#[error("correction table failed validation with {} error(s)", .errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub address: AccAddress,
    pub amount: BigUint,
}

/// Record flagged as unusually large. Kept in the table unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub index: usize,
    pub address: AccAddress,
    pub amount: BigUint,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub records: usize,
    #[serde_as(as = "DisplayFromStr")]
    pub total: BigUint,
    pub zero_amounts: usize,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub min: Option<BigUint>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max: Option<BigUint>,
    pub anomalies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTable {
    records: Vec<ValidatedRecord>,
    total: BigUint,
    anomalies: Vec<Anomaly>,
}

impl ValidatedTable {
    pub fn records(&self) -> &[ValidatedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total(&self) -> &BigUint {
        &self.total
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn get(&self, address: &AccAddress) -> Option<&BigUint> {
        self.records
            .iter()
            .find(|r| &r.address == address)
            .map(|r| &r.amount)
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            records: self.records.len(),
            total: self.total.clone(),
            zero_amounts: self.records.iter().filter(|r| r.amount.is_zero()).count(),
            min: self.records.iter().map(|r| &r.amount).min().cloned(),
            max: self.records.iter().map(|r| &r.amount).max().cloned(),
            anomalies: self.anomalies.len(),
        }
    }
}

/// Checks every record of `table`, collecting all problems rather than
/// stopping at the first one.
pub fn validate(
    table: &CorrectionTable,
    account_prefix: &str,
    config: &ValidationConfig,
) -> Result<ValidatedTable, ValidationFailure> {
    let mut errors = vec![];
    let mut records = Vec::with_capacity(table.len());
    let mut anomalies = vec![];
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(table.len());
    let mut total = BigUint::zero();

    for (index, record) in table.iter().enumerate() {
        if record.address.is_empty() {
            errors.push(ValidationError::EmptyField {
                index,
                field: "address",
            });
        }
        if record.amount.is_empty() {
            errors.push(ValidationError::EmptyField {
                index,
                field: "amount",
            });
        }

        if !record.address.is_empty() {
            if let Some(first) = seen.insert(record.address.as_str(), index) {
                errors.push(ValidationError::DuplicateAddress {
                    address: record.address.clone(),
                    first,
                    second: index,
                });
            }
        }

        let address = match AccAddress::parse_with_prefix(&record.address, account_prefix) {
            Ok(address) => {
                let canonical = address.to_string();
                if canonical != record.address {
                    errors.push(ValidationError::NonCanonicalAddress {
                        index,
                        address: record.address.clone(),
                        canonical,
                    });
                }
                Some(address)
            }
            Err(reason) if !record.address.is_empty() => {
                errors.push(ValidationError::InvalidAddress {
                    index,
                    address: record.address.clone(),
                    reason,
                });
                None
            }
            Err(_) => None,
        };

        let amount = match parse_amount(&record.amount) {
            Some(amount) => Some(amount),
            None if !record.amount.is_empty() => {
                errors.push(ValidationError::MalformedAmount {
                    index,
                    address: record.address.clone(),
                    amount: record.amount.clone(),
                });
                None
            }
            None => None,
        };

        let Some(amount) = amount else { continue };
        total += &amount;
        let Some(address) = address else { continue };

        if let Some(threshold) = &config.anomaly_threshold {
            if &amount > threshold {
                tracing::warn!(
                    "record {index}: credit of {amount} to {address} exceeds the anomaly threshold of {threshold}"
                );
                anomalies.push(Anomaly {
                    index,
                    address: address.clone(),
                    amount: amount.clone(),
                });
            }
        }
        records.push(ValidatedRecord { address, amount });
    }

    if let Some(bound) = &config.max_total_mint {
        if &total > bound {
            errors.push(ValidationError::TotalExceedsBound {
                total: total.clone(),
                bound: bound.clone(),
            });
        }
    }

    if errors.is_empty() {
        tracing::debug!(
            "validated {} correction records, total {total}",
            records.len()
        );
        Ok(ValidatedTable {
            records,
            total,
            anomalies,
        })
    } else {
        Err(ValidationFailure { errors })
    }
}

/// Widest amount the chain's `sdk.Int` accepts.
pub const MAX_AMOUNT_BITS: u64 = 256;

/// Strict decimal parse: digits only, no sign, whitespace or exponent, and at
/// most [`MAX_AMOUNT_BITS`] wide.
pub fn parse_amount(amount: &str) -> Option<BigUint> {
    if !lazy_regex::regex_is_match!(r"^[0-9]+$", amount) {
        return None;
    }
    BigUint::parse_bytes(amount.as_bytes(), 10).filter(|n| n.bits() <= MAX_AMOUNT_BITS)
}
