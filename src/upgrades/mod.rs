// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Named upgrade handlers, run once at the block a governance plan
//! schedules them.

mod v1_4;

pub use v1_4::{CosPatchConfig, CosPatchReport, revert_cos_tombstoning};

use std::str::FromStr as _;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::cli_shared::cli::Config;
use crate::correction_table::CorrectionTable;
use crate::keepers::ChainState;
use crate::networks::Height;

/// Governance upgrade plan: the handler name and the block it runs at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub height: i64,
}

impl Plan {
    pub fn new(height: Height, block: i64) -> Self {
        Self {
            name: height.to_string(),
            height: block,
        }
    }
}

/// Everything a handler reads besides chain state.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeInputs<'a> {
    pub config: &'a Config,
    pub table: &'a CorrectionTable,
}

impl<'a> UpgradeInputs<'a> {
    /// Inputs using the compiled-in compensation table.
    pub fn embedded(config: &'a Config) -> Self {
        Self {
            config,
            table: CorrectionTable::embedded(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "upgrade", rename_all = "snake_case")]
pub enum UpgradeReport {
    CosPatch(CosPatchReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpgradeOutcome {
    Applied { height: i64, report: UpgradeReport },
    AlreadyApplied { height: i64 },
}

type RunUpgrade<S> = fn(&UpgradeInputs<'_>, &mut S) -> anyhow::Result<UpgradeReport>;

fn handler<S: ChainState>(height: Height) -> RunUpgrade<S> {
    match height {
        Height::V1_4 => v1_4::run_upgrade::<S>,
    }
}

/// Applies `plan` to `state` at most once.
///
/// The handler runs on a clone of `state`; the clone replaces `state` only if
/// the handler succeeds, so a failure part way through the table leaves no
/// partial credits behind. A plan whose name is already marked done is a
/// no-op.
pub fn apply_upgrade<S: ChainState>(
    plan: &Plan,
    inputs: &UpgradeInputs<'_>,
    state: &mut S,
) -> anyhow::Result<UpgradeOutcome> {
    let height = Height::from_str(&plan.name)
        .with_context(|| format!("no upgrade handler registered for plan `{}`", plan.name))?;

    if let Some(done) = state.done_height(&plan.name) {
        tracing::info!(
            "Upgrade {height} was already applied at height {done}, skipping plan at height {}",
            plan.height
        );
        return Ok(UpgradeOutcome::AlreadyApplied { height: done });
    }

    if let Some(scheduled) = inputs.config.chain.block(height) {
        anyhow::ensure!(
            scheduled == plan.height,
            "plan {height} targets height {} but {} schedules it at {scheduled}",
            plan.height,
            inputs.config.chain.network
        );
    }

    tracing::info!("Running {height} upgrade at height {}", plan.height);
    let start_time = std::time::Instant::now();
    let mut branch = state.clone();
    let report = handler::<S>(height)(inputs, &mut branch).with_context(|| {
        format!(
            "upgrade {height} at height {} failed, state left unchanged",
            plan.height
        )
    })?;
    branch.set_done(&plan.name, plan.height);
    *state = branch;

    let elapsed = start_time.elapsed().as_secs_f32();
    tracing::info!(
        "Upgrade {height} at height {} was successful. Took {elapsed}s.",
        plan.height
    );
    Ok(UpgradeOutcome::Applied {
        height: plan.height,
        report,
    })
}
