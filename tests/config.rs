// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod common;

use predicates::prelude::*;
use tombstone_revert::{CONFIG_PATH_ENV, Config};

use crate::common::{create_tmp_config, tool};

const DEVNET_CONFIG: &str = r#"
[chain]
network = { type = "devnet", name = "localsecret" }
chain_id = "secretdev-1"
height_infos = [{ height = "v1.4", block = 7 }]

[cos_patch]
restake = false
"#;

#[test]
fn test_config_subcommand_produces_valid_toml_configuration_dump() {
    let cmd = tool().arg("config").arg("dump").assert().success();

    let output = &cmd.get_output().stdout;
    let config = toml::from_str::<Config>(std::str::from_utf8(output).unwrap())
        .expect("Invalid configuration!");
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_parameter() {
    let (config_file, _dir) = create_tmp_config(DEVNET_CONFIG);

    let cmd = tool()
        .arg("--config")
        .arg(&config_file)
        .arg("config")
        .arg("dump")
        .assert()
        .success();

    let output = &cmd.get_output().stdout;
    let config = toml::from_str::<Config>(std::str::from_utf8(output).unwrap()).unwrap();
    assert_eq!(config.chain.chain_id, "secretdev-1");
    assert!(!config.cos_patch.restake);
}

#[test]
fn test_config_env_var() {
    let (config_file, _dir) = create_tmp_config(DEVNET_CONFIG);

    let cmd = tool()
        .env(CONFIG_PATH_ENV, &config_file)
        .arg("upgrade")
        .arg("simulate")
        .assert()
        .success();

    let output: serde_json::Value = serde_json::from_slice(&cmd.get_output().stdout).unwrap();
    assert_eq!(output["plan"]["height"], 7);
    assert_eq!(output["first"]["report"]["restaked"], false);
}

#[test]
fn test_invalid_config_is_an_error() {
    let (config_file, _dir) = create_tmp_config("[cos_patch]\nrestake = \"sometimes\"\n");

    tool()
        .arg("--config")
        .arg(&config_file)
        .arg("config")
        .arg("dump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
