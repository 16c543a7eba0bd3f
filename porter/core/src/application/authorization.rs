// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Authorization Gate
//!
//! The single choke-point between inbound domain operations and the
//! integrator's [`Handler`]. Every gated operation passes these checks
//! **in order**, and the first failure returns immediately:
//!
//! 1. Liveness: the porter has an enablement session ([`PorterError::Unauthorized`])
//! 2. Shape: the request's required fields are set ([`PorterError::InvalidArgument`])
//! 3. Capability: every identifier is declared in the
//!    [`CapabilityDescriptor`] ([`PorterError::Unsupported`])
//! 4. Dispatch: the request is handed to the handler unchanged and its result
//!    is returned unchanged
//!
//! Liveness is evaluated once, at check time. An operation that passed it is
//! allowed to finish even if a takeover commits while the handler runs.

use std::sync::Arc;

use tracing::debug;

use crate::application::session_store::SessionStore;
use crate::domain::capability::{AccountPlatform, CapabilityDescriptor};
use crate::domain::error::{CapabilityCategory, PorterError};
use crate::domain::handler::Handler;
use crate::domain::request::{
    Account, AccountId, AppInfo, FeedItem, PullAccountAppRelationRequest, PullAccountRequest,
    PullAppRequest, PullFeedRequest, PushFeedItemsRequest, RelationType, SearchAppRequest,
};

pub struct AuthorizationGate {
    store: Arc<SessionStore>,
    descriptor: Arc<CapabilityDescriptor>,
    handler: Arc<dyn Handler>,
}

impl AuthorizationGate {
    pub fn new(
        store: Arc<SessionStore>,
        descriptor: Arc<CapabilityDescriptor>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self {
            store,
            descriptor,
            handler,
        }
    }

    pub async fn pull_account(&self, request: PullAccountRequest) -> Result<Account, PorterError> {
        self.authorize("pull_account", || {
            request.validate()?;
            self.require_account_platform(&request.account_id).map(|_| ())
        })?;
        self.handler.pull_account(request).await
    }

    pub async fn pull_app(&self, request: PullAppRequest) -> Result<AppInfo, PorterError> {
        self.authorize("pull_app", || {
            request.validate()?;
            self.require_app_source(&request.app_id.source)
        })?;
        self.handler.pull_app(request).await
    }

    pub async fn pull_account_app_relation(
        &self,
        request: PullAccountAppRelationRequest,
    ) -> Result<Vec<AppInfo>, PorterError> {
        self.authorize("pull_account_app_relation", || {
            request.validate()?;
            self.require_relation(&request.account_id, request.relation_type)
        })?;
        self.handler.pull_account_app_relation(request).await
    }

    pub async fn search_app(&self, request: SearchAppRequest) -> Result<Vec<AppInfo>, PorterError> {
        self.authorize("search_app", || {
            request.validate()?;
            // Search spans every source, so any declared source is enough.
            if self.descriptor.app_sources().is_empty() {
                return Err(PorterError::unsupported(CapabilityCategory::AppSource, "*"));
            }
            Ok(())
        })?;
        self.handler.search_app(request).await
    }

    pub async fn pull_feed(&self, request: PullFeedRequest) -> Result<Vec<FeedItem>, PorterError> {
        self.authorize("pull_feed", || {
            request.validate()?;
            if !self.descriptor.supports_feed_source(&request.source.id) {
                return Err(PorterError::unsupported(
                    CapabilityCategory::FeedSource,
                    &request.source.id,
                ));
            }
            Ok(())
        })?;
        self.handler.pull_feed(request).await
    }

    pub async fn push_feed_items(&self, request: PushFeedItemsRequest) -> Result<(), PorterError> {
        self.authorize("push_feed_items", || {
            request.validate()?;
            if !self.descriptor.supports_notify_destination(&request.destination.id) {
                return Err(PorterError::unsupported(
                    CapabilityCategory::NotifyDestination,
                    &request.destination.id,
                ));
            }
            Ok(())
        })?;
        self.handler.push_feed_items(request).await
    }

    /// Liveness first, then the operation-specific checks.
    fn authorize(
        &self,
        operation: &'static str,
        checks: impl FnOnce() -> Result<(), PorterError>,
    ) -> Result<(), PorterError> {
        let result = if self.store.is_enabled() {
            checks()
        } else {
            Err(PorterError::Unauthorized)
        };
        if let Err(e) = &result {
            debug!(operation, error = %e, "Request rejected by authorization gate");
        }
        result
    }

    fn require_account_platform(
        &self,
        account_id: &AccountId,
    ) -> Result<&AccountPlatform, PorterError> {
        self.descriptor
            .account_platform(&account_id.platform)
            .ok_or_else(|| {
                PorterError::unsupported(CapabilityCategory::AccountPlatform, &account_id.platform)
            })
    }

    fn require_relation(
        &self,
        account_id: &AccountId,
        relation: RelationType,
    ) -> Result<(), PorterError> {
        let platform = self.require_account_platform(account_id)?;
        if !platform.allows(relation) {
            return Err(PorterError::unsupported(
                CapabilityCategory::RelationType,
                relation.to_string(),
            ));
        }
        Ok(())
    }

    fn require_app_source(&self, source: &str) -> Result<(), PorterError> {
        if !self.descriptor.supports_app_source(source) {
            return Err(PorterError::unsupported(CapabilityCategory::AppSource, source));
        }
        Ok(())
    }
}
