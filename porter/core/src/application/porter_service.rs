// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Porter Service
//!
//! Inbound operation surface of a porter, independent of transport. Wires one
//! [`SessionStore`] into both the [`EnablementService`] and the
//! [`AuthorizationGate`] so they always agree on who owns the porter.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Assembles the session, enablement and gate for presentation adapters

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::enablement::{EnableOutcome, EnableRequest, EnablementService};
use crate::application::session_store::SessionStore;
use crate::domain::capability::{CapabilityDescriptor, PorterIdentity, PorterInformation};
use crate::domain::error::PorterError;
use crate::domain::handler::Handler;
use crate::domain::session::HeartbeatPolicy;
use crate::domain::token::TokenRefresher;

/// Behavioural switches for a [`PorterService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PorterOptions {
    pub heartbeat: HeartbeatPolicy,
    /// When false, enablement skips the token exchange and stores empty tokens.
    pub require_token: bool,
}

impl Default for PorterOptions {
    fn default() -> Self {
        Self {
            heartbeat: HeartbeatPolicy::default(),
            require_token: true,
        }
    }
}

pub struct PorterService {
    information: PorterInformation,
    store: Arc<SessionStore>,
    enablement: EnablementService,
    gate: AuthorizationGate,
}

impl PorterService {
    pub fn new(
        identity: PorterIdentity,
        descriptor: CapabilityDescriptor,
        handler: Arc<dyn Handler>,
        refresher: Arc<dyn TokenRefresher>,
        options: PorterOptions,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        let enablement = EnablementService::new(
            store.clone(),
            refresher,
            options.heartbeat,
            options.require_token,
        );
        let gate = AuthorizationGate::new(store.clone(), Arc::new(descriptor.clone()), handler);
        Self {
            information: PorterInformation {
                identity,
                descriptor,
            },
            store,
            enablement,
            gate,
        }
    }

    /// Static identity and capabilities. Needs no session.
    pub fn information(&self) -> &PorterInformation {
        &self.information
    }

    pub async fn enable(&self, request: EnableRequest) -> Result<EnableOutcome, PorterError> {
        self.enablement.enable(request).await
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn heartbeat_policy(&self) -> &HeartbeatPolicy {
        self.enablement.policy()
    }
}
