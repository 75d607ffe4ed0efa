// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;
use serde::Deserialize;

const RECORDS_PATH: &str = "assets/cos_mints.json";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct Record {
    address: String,
    amount: String,
}

fn main() -> anyhow::Result<()> {
    ensure_records_includable()
}

// The table is embedded with `include_str!`, so a malformed asset would only
// surface at first access. Fail the build instead.
fn ensure_records_includable() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed={RECORDS_PATH}");

    let json = std::fs::read_to_string(RECORDS_PATH)
        .with_context(|| format!("{RECORDS_PATH} doesn't exist"))?;
    let records: Vec<Record> = serde_json::from_str(&json)
        .with_context(|| format!("{RECORDS_PATH} is not a JSON array of address/amount records"))?;
    anyhow::ensure!(!records.is_empty(), "{RECORDS_PATH} has no records");
    Ok(())
}
