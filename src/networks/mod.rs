// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

use crate::shim::address::DEFAULT_ACCOUNT_PREFIX;
use crate::shim::econ::DEFAULT_DENOM;

pub const MAINNET_CHAIN_ID: &str = "secret-4";
pub const PULSAR_CHAIN_ID: &str = "pulsar-3";

/// Block at which local devnets schedule the `v1.4` upgrade.
const DEVNET_V1_4_HEIGHT: i64 = 100;

/// Secret Network chains. Only `mainnet` carries real compensation
/// records; the others exist to rehearse the upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "lowercase")]
pub enum NetworkChain {
    Mainnet,
    Pulsar,
    Devnet(String),
}

impl FromStr for NetworkChain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" | MAINNET_CHAIN_ID => Ok(NetworkChain::Mainnet),
            "pulsar" | PULSAR_CHAIN_ID => Ok(NetworkChain::Pulsar),
            "" => anyhow::bail!("network name must not be empty"),
            name => Ok(NetworkChain::Devnet(name.to_owned())),
        }
    }
}

impl Display for NetworkChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkChain::Mainnet => write!(f, "mainnet"),
            NetworkChain::Pulsar => write!(f, "pulsar"),
            NetworkChain::Devnet(name) => write!(f, "{name}"),
        }
    }
}

impl NetworkChain {
    pub fn is_testnet(&self) -> bool {
        !matches!(self, NetworkChain::Mainnet)
    }
}

/// Named software upgrades that carry a state migration.
#[derive(
    Debug, StrumDisplay, EnumString, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash,
)]
pub enum Height {
    #[strum(serialize = "v1.4")]
    #[serde(rename = "v1.4")]
    V1_4,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HeightInfo {
    pub height: Height,
    pub block: i64,
}

/// Defines the chain parameters the upgrade handlers depend on.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct ChainConfig {
    pub network: NetworkChain,
    pub chain_id: String,
    pub account_prefix: String,
    pub denom: String,
    /// Blocks at which named upgrades are scheduled. Mainnet heights come from
    /// the governance proposal and are set through the configuration file.
    pub height_infos: Vec<HeightInfo>,
}

impl ChainConfig {
    pub fn mainnet() -> Self {
        Self {
            network: NetworkChain::Mainnet,
            chain_id: MAINNET_CHAIN_ID.to_owned(),
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_owned(),
            denom: DEFAULT_DENOM.to_owned(),
            height_infos: vec![],
        }
    }

    pub fn pulsar() -> Self {
        Self {
            network: NetworkChain::Pulsar,
            chain_id: PULSAR_CHAIN_ID.to_owned(),
            ..Self::mainnet()
        }
    }

    pub fn devnet() -> Self {
        Self {
            network: NetworkChain::Devnet("devnet".to_owned()),
            chain_id: "secretdev-1".to_owned(),
            height_infos: vec![HeightInfo {
                height: Height::V1_4,
                block: DEVNET_V1_4_HEIGHT,
            }],
            ..Self::mainnet()
        }
    }

    pub fn from_chain(network_chain: &NetworkChain) -> Self {
        match network_chain {
            NetworkChain::Mainnet => Self::mainnet(),
            NetworkChain::Pulsar => Self::pulsar(),
            NetworkChain::Devnet(name) => Self {
                network: NetworkChain::Devnet(name.clone()),
                ..Self::devnet()
            },
        }
    }

    /// Block at which `height` is scheduled, if known.
    pub fn block(&self, height: Height) -> Option<i64> {
        self.height_infos
            .iter()
            .find(|info| info.height == height)
            .map(|info| info.block)
    }

    pub fn is_testnet(&self) -> bool {
        self.network.is_testnet()
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig::mainnet()
    }
}
