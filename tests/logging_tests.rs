// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use safai_saathi::logging::{env_filter, init_logging};

#[test]
fn test_init_logging_only_once() {
    assert!(init_logging().is_ok());
    assert!(init_logging().is_err());

    tracing::info!("logging initialized");
}

#[test]
fn test_env_filter_includes_crate_default() {
    let filter = env_filter().to_string();
    assert!(filter.contains("safai_saathi=debug"));
}
