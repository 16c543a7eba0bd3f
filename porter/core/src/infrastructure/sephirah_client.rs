// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Sephirah gRPC Client
//!
//! Outbound calls a porter makes to the Sephirah identity service.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** gRPC communication with `LibrarianSephirahService`
//! - **Integration:** Porter enablement → Sephirah `RefreshToken` / `GainUserPrivilege`
//!
//! # Authentication
//!
//! Both calls authenticate with a bearer token in the `authorization` metadata
//! entry: the refresh token for `RefreshToken`, the porter's current access
//! token for `GainUserPrivilege`.
//!
//! # Failure Semantics
//!
//! Calls are made once, never retried. A failed call returns the original
//! [`tonic::Status`] wrapped in `anyhow::Error`; the porter's gRPC adapter
//! unwraps it so the inbound caller sees the upstream code and message.
//!
//! The channel connects lazily, so constructing the client never blocks on
//! Sephirah being reachable.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Channel;
use tonic::Request;

use crate::domain::session::TokenPair;
use crate::domain::token::TokenRefresher;
use crate::infrastructure::proto::librarian::sephirah::v1::{
    librarian_sephirah_service_client::LibrarianSephirahServiceClient, GainUserPrivilegeRequest,
    RefreshTokenRequest,
};
use crate::infrastructure::proto::librarian::v1::InternalId;

#[derive(Clone)]
pub struct SephirahClient {
    client: LibrarianSephirahServiceClient<Channel>,
}

impl SephirahClient {
    /// Create a client for `endpoint`. Every call is bounded by `timeout`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(endpoint: &str, timeout: Duration) -> Result<Self> {
        // Ensure address has scheme
        let addr = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("http://{}", endpoint)
        };

        let channel = Channel::from_shared(addr)
            .context("Invalid Sephirah endpoint")?
            .timeout(timeout)
            .connect_lazy();

        Ok(Self {
            client: LibrarianSephirahServiceClient::new(channel),
        })
    }

    /// Trade the porter's access token for one scoped to `user_id`.
    pub async fn gain_user_privilege(&self, access_token: &str, user_id: i64) -> Result<String> {
        let request = with_bearer(
            GainUserPrivilegeRequest {
                user_id: Some(InternalId { id: user_id }),
            },
            access_token,
        )?;

        let response = self
            .client
            .clone()
            .gain_user_privilege(request)
            .await
            .map_err(anyhow::Error::new)?;

        Ok(response.into_inner().access_token)
    }
}

#[async_trait]
impl TokenRefresher for SephirahClient {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let request = with_bearer(RefreshTokenRequest {}, refresh_token)?;

        let response = self
            .client
            .clone()
            .refresh_token(request)
            .await
            .map_err(anyhow::Error::new)?
            .into_inner();

        Ok(TokenPair::new(response.access_token, response.refresh_token))
    }
}

fn with_bearer<T>(message: T, token: &str) -> Result<Request<T>> {
    let mut request = Request::new(message);
    let value = format!("Bearer {}", token)
        .parse::<MetadataValue<Ascii>>()
        .context("Token is not a valid header value")?;
    request.metadata_mut().insert("authorization", value);
    Ok(request)
}
