// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod common;

use crate::common::tool;

#[test]
fn log_json_writes_json_lines_to_stderr() {
    let cmd = tool()
        .arg("--log-json")
        .arg("upgrade")
        .arg("simulate")
        .arg("--height")
        .arg("5309200")
        .assert()
        .success();

    let stderr = std::str::from_utf8(&cmd.get_output().stderr).unwrap();
    let lines = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
        .collect::<Vec<_>>();
    assert!(lines.iter().any(|line| {
        line["level"] == "INFO"
            && line["fields"]["message"]
                .as_str()
                .is_some_and(|message| message.contains("Running v1.4 upgrade at height 5309200"))
    }));

    // stdout stays a single JSON document
    serde_json::from_slice::<serde_json::Value>(&cmd.get_output().stdout).unwrap();
}

#[test]
fn color_never_disables_ansi_escapes() {
    let cmd = tool()
        .arg("--color")
        .arg("never")
        .arg("upgrade")
        .arg("simulate")
        .arg("--height")
        .arg("5309200")
        .assert()
        .success();

    let stderr = std::str::from_utf8(&cmd.get_output().stderr).unwrap();
    assert!(stderr.contains("Running v1.4 upgrade at height 5309200"));
    assert!(!stderr.contains('\u{1b}'));
}

#[test]
fn color_rejects_unknown_values() {
    tool()
        .arg("--color")
        .arg("sometimes")
        .arg("config")
        .arg("dump")
        .assert()
        .failure();
}
