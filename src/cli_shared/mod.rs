// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod cli;
pub mod logger;

use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli_shared::cli::{Config, ConfigPath, find_config_path};
use crate::networks::{ChainConfig, NetworkChain};
use crate::utils::io::read_toml;

/// Loads the configuration from `config_path_opt`, or from the path in the
/// environment, falling back to defaults. `chain_opt` replaces the chain
/// section with the built-in parameters of that network.
pub fn read_config(
    config_path_opt: Option<&PathBuf>,
    chain_opt: Option<NetworkChain>,
) -> anyhow::Result<(Option<ConfigPath>, Config)> {
    let (path, mut config) = match find_config_path(config_path_opt) {
        Some(path) => {
            let toml = std::fs::read_to_string(path.to_path_buf())
                .with_context(|| format!("failed to read {}", path.to_path_buf().display()))?;
            let config = read_toml(&toml)
                .with_context(|| format!("invalid configuration in {}", path.to_path_buf().display()))?;
            (Some(path), config)
        }
        None => (None, Config::default()),
    };
    if let Some(chain) = chain_opt {
        config.chain = ChainConfig::from_chain(&chain);
    }
    Ok((path, config))
}
