// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Telemetry
//!
//! Installs the process-wide `tracing` subscriber for a porter binary.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Logging bootstrap

use anyhow::{Context, Result};

/// Initialize tracing subscriber for logging
///
/// `RUST_LOG` wins over `level` when set. Fails if a global subscriber is
/// already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
