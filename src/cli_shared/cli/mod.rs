// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod config;

pub use self::config::*;

use std::path::PathBuf;

use crate::networks::NetworkChain;
use crate::utils::misc::LoggingColor;

/// Environment variable pointing at a configuration file.
pub const CONFIG_PATH_ENV: &str = "TOMBSTONE_REVERT_CONFIG_PATH";

pub const HELP_MESSAGE: &str = "\
{name} {version}
{about}

{usage-heading} {usage}

{all-args}
";

/// Options shared by every subcommand.
#[derive(Debug, Default, clap::Args)]
pub struct CliOpts {
    /// A TOML file containing relevant configurations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Use the built-in chain parameters of this network (`mainnet`,
    /// `pulsar` or a devnet name), replacing the `[chain]` section
    #[arg(long, global = true)]
    pub chain: Option<NetworkChain>,
    /// Enable or disable colored logging in `stderr`
    #[arg(long, global = true, default_value = "auto")]
    pub color: LoggingColor,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Where the configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPath {
    Env(PathBuf),
    Cli(PathBuf),
}

impl ConfigPath {
    pub fn to_path_buf(&self) -> &PathBuf {
        match self {
            ConfigPath::Env(path) | ConfigPath::Cli(path) => path,
        }
    }
}

/// An explicit `--config` wins over [`CONFIG_PATH_ENV`].
pub fn find_config_path(config: Option<&PathBuf>) -> Option<ConfigPath> {
    if let Some(path) = config {
        return Some(ConfigPath::Cli(path.clone()));
    }
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(ConfigPath::Env(path));
        }
        tracing::warn!(
            "{CONFIG_PATH_ENV} is set to {} which does not exist, using defaults",
            path.display()
        );
    }
    None
}
