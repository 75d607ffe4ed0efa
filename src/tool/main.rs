// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ffi::OsString;

use clap::Parser as _;

use super::subcommands::{Cli, Subcommand};
use crate::cli_shared::{cli::ConfigPath, logger::setup_minimal_logger, read_config};

pub fn main<ArgT>(args: impl IntoIterator<Item = ArgT>) -> anyhow::Result<()>
where
    ArgT: Into<OsString> + Clone,
{
    // Capture Cli inputs
    let Cli { opts, cmd } = Cli::parse_from(args);
    setup_minimal_logger(&opts);

    let (config_path, config) = read_config(opts.config.as_ref(), opts.chain.clone())?;
    match &config_path {
        Some(ConfigPath::Env(path)) => {
            tracing::info!("TOMBSTONE_REVERT_CONFIG_PATH loaded: {}", path.display())
        }
        Some(ConfigPath::Cli(path)) => tracing::info!("Config file loaded: {}", path.display()),
        None => tracing::debug!("No configuration file, using defaults"),
    }

    match cmd {
        Subcommand::Table(cmd) => cmd.run(&config),
        Subcommand::Upgrade(cmd) => cmd.run(&config),
        Subcommand::Config(cmd) => cmd.run(&config),
    }
}
