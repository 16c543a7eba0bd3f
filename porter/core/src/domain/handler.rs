// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Handler
//!
//! The integrator's domain implementation. Methods are only ever invoked by
//! [`crate::application::authorization::AuthorizationGate`] after the session,
//! request shape and capability checks have passed, and their results are
//! returned to the caller as-is.
//!
//! Every method is required. An integrator that does not offer an operation
//! returns [`PorterError::NotImplemented`] from it rather than an empty result.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Consumed collaborator seam for gated operations

use async_trait::async_trait;

use crate::domain::error::PorterError;
use crate::domain::request::{
    Account, AppInfo, FeedItem, PullAccountAppRelationRequest, PullAccountRequest, PullAppRequest,
    PullFeedRequest, PushFeedItemsRequest, SearchAppRequest,
};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn pull_account(&self, request: PullAccountRequest) -> Result<Account, PorterError>;

    async fn pull_app(&self, request: PullAppRequest) -> Result<AppInfo, PorterError>;

    async fn pull_account_app_relation(
        &self,
        request: PullAccountAppRelationRequest,
    ) -> Result<Vec<AppInfo>, PorterError>;

    async fn search_app(&self, request: SearchAppRequest) -> Result<Vec<AppInfo>, PorterError>;

    async fn pull_feed(&self, request: PullFeedRequest) -> Result<Vec<FeedItem>, PorterError>;

    async fn push_feed_items(&self, request: PushFeedItemsRequest) -> Result<(), PorterError>;
}
