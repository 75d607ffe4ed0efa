// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Bech32 addresses of the Cosmos SDK flavour used by Secret Network.
//!
//! All three address kinds share a 20-byte payload and differ only in the
//! human readable part: `secret`, `secretvaloper` and `secretvalcons` on
//! mainnet.

use std::{fmt, marker::PhantomData, str::FromStr};

use bech32::{FromBase32 as _, ToBase32 as _, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Account prefix of Secret Network mainnet and testnets.
pub const DEFAULT_ACCOUNT_PREFIX: &str = "secret";

/// Payload length of account, operator and consensus addresses.
pub const ADDRESS_LEN: usize = 20;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid bech32 encoding: {0}")]
    Bech32(#[from] bech32::Error),
    #[error("expected prefix `{expected}`, got `{actual}`")]
    WrongPrefix { expected: String, actual: String },
    #[error("expected bech32 checksum, got bech32m")]
    WrongVariant,
    #[error("expected a {ADDRESS_LEN}-byte payload, got {0} bytes")]
    WrongLength(usize),
}

/// Distinguishes the address kinds at the type level.
pub trait AddressKind {
    /// Appended to the chain's account prefix to form the human readable part.
    const PREFIX_SUFFIX: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Account {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Consensus {}

impl AddressKind for Account {
    const PREFIX_SUFFIX: &'static str = "";
}

impl AddressKind for Operator {
    const PREFIX_SUFFIX: &'static str = "valoper";
}

impl AddressKind for Consensus {
    const PREFIX_SUFFIX: &'static str = "valcons";
}

pub type AccAddress = Address<Account>;
pub type ValAddress = Address<Operator>;
pub type ConsAddress = Address<Consensus>;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address<K> {
    hrp: String,
    bytes: [u8; ADDRESS_LEN],
    kind: PhantomData<K>,
}

impl<K: AddressKind> Address<K> {
    /// Human readable part expected for this kind under `account_prefix`.
    pub fn expected_hrp(account_prefix: &str) -> String {
        format!("{account_prefix}{}", K::PREFIX_SUFFIX)
    }

    pub fn from_bytes(account_prefix: &str, bytes: [u8; ADDRESS_LEN]) -> Self {
        Self {
            hrp: Self::expected_hrp(account_prefix),
            bytes,
            kind: PhantomData,
        }
    }

    /// Decodes `s`, requiring the human readable part derived from
    /// `account_prefix`.
    pub fn parse_with_prefix(s: &str, account_prefix: &str) -> Result<Self, AddressError> {
        let (hrp, data, variant) = bech32::decode(s)?;
        let expected = Self::expected_hrp(account_prefix);
        if hrp != expected {
            return Err(AddressError::WrongPrefix {
                expected,
                actual: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::WrongVariant);
        }
        let payload = Vec::<u8>::from_base32(&data)?;
        let bytes: [u8; ADDRESS_LEN] = payload
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::WrongLength(payload.len()))?;
        Ok(Self {
            hrp,
            bytes,
            kind: PhantomData,
        })
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }
}

impl<K: AddressKind> FromStr for Address<K> {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_prefix(s, DEFAULT_ACCOUNT_PREFIX)
    }
}

impl<K> fmt::Display for Address<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = bech32::encode(&self.hrp, self.bytes.to_base32(), Variant::Bech32)
            .map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl<K> fmt::Debug for Address<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl<K> Serialize for Address<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, K: AddressKind> Deserialize<'de> for Address<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
