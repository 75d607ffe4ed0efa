// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use crate::correction_table::ValidationConfig;
use crate::networks::ChainConfig;
use crate::upgrades::CosPatchConfig;

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub chain: ChainConfig,
    pub cos_patch: CosPatchConfig,
    pub validation: ValidationConfig,
}
