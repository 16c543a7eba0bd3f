// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::session::TokenPair;

/// Exchanges a refresh credential for a fresh token pair at the identity service.
///
/// Implementations make exactly one outbound call and never retry; any failure
/// is returned unchanged so the enablement flow can surface it verbatim.
/// The gRPC implementation is [`crate::infrastructure::sephirah_client::SephirahClient`].
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair>;
}
