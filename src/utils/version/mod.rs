// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::LazyLock;

/// Crate version with the upgrade it ships, e.g. `0.1.0+v1.4`
pub static TOOL_VERSION_STRING: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}+{}",
        env!("CARGO_PKG_VERSION"),
        crate::networks::Height::V1_4
    )
});
