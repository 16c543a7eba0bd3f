// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod config;
pub mod proto;
pub mod sephirah_client;
pub mod telemetry;

pub use config::PorterSettings;
pub use sephirah_client::SephirahClient;
