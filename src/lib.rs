// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Reversal of the COS validator tombstoning on Secret Network.
//!
//! The crate ships the compensation table owed to the validator's delegators
//! and the `v1.4` upgrade handler that unjails the validator and re-mints the
//! slashed stake, together with the `tombstone-revert-tool` binary used to
//! inspect the table and rehearse the upgrade.

mod cli_shared;
pub mod correction_table;
pub mod keepers;
pub mod networks;
pub mod shim;
mod tool;
pub mod upgrades;
mod utils;

/// These items are semver-exempt, and exist for doctests only
#[doc(hidden)]
pub mod doctest_private {
    pub use crate::utils::io::read_toml;
}

pub use cli_shared::cli::{CONFIG_PATH_ENV, Config};
pub use correction_table::{CorrectionRecord, CorrectionTable, RECORDS_JSON};
pub use tool::main::main as tool_main;
pub use upgrades::{Plan, UpgradeInputs, UpgradeOutcome, apply_upgrade};
