// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use tempfile::TempDir;
use tombstone_revert::CONFIG_PATH_ENV;

pub fn tool() -> Command {
    let mut cmd = cargo_bin_cmd!("tombstone-revert-tool");
    cmd.env_remove(CONFIG_PATH_ENV).env_remove("RUST_LOG");
    cmd
}

/// Writes `contents` to a fresh `config.toml`; keep the [`TempDir`] alive for
/// as long as the file is needed.
pub fn create_tmp_config(contents: &str) -> (PathBuf, TempDir) {
    let temp_dir = tempfile::tempdir().expect("couldn't create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(&config_file, contents).expect("couldn't write config");
    (config_file, temp_dir)
}

pub fn create_tmp_table(json: &str) -> (PathBuf, TempDir) {
    let temp_dir = tempfile::tempdir().expect("couldn't create temp dir");
    let table_file = temp_dir.path().join("cos_mints.json");
    std::fs::write(&table_file, json).expect("couldn't write table");
    (table_file, temp_dir)
}
