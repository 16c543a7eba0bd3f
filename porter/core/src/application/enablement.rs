// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Enablement Service
//!
//! Runs the `EnablePorter` state machine on top of the shared
//! [`SessionStore`].
//!
//! ## Flow
//!
//! ```text
//! EnablePorter { owner, refresh_token }
//!   └─ SessionStore::begin_transition()         ← one enablement at a time
//!   └─ Session::decide(current, owner, now)
//!        ├─ Heartbeat  → touch heartbeat, done (no exchange)
//!        ├─ Conflict   → PorterError::Conflict { current owner }
//!        └─ Acquire    → refresh_token empty?  → need_refresh_token = true
//!                        TokenRefresher::refresh(refresh_token)
//!                        SessionStore::replace(new session)
//! ```
//!
//! A failed exchange returns before anything is written, so the session is
//! exactly what it was before the call. If the calling future is dropped while
//! the exchange is in flight, the transition lock is released and nothing is
//! committed; a replacement that already happened is never undone.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::application::session_store::SessionStore;
use crate::domain::error::PorterError;
use crate::domain::session::{EnableDecision, HeartbeatPolicy, OwnerId, Session, TokenPair};
use crate::domain::token::TokenRefresher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableRequest {
    pub owner: OwnerId,
    pub refresh_token: String,
}

impl EnableRequest {
    pub fn new(owner: OwnerId, refresh_token: impl Into<String>) -> Self {
        Self {
            owner,
            refresh_token: refresh_token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableOutcome {
    pub status_message: String,
    /// The caller must retry with a refresh token before the porter is enabled.
    pub need_refresh_token: bool,
}

impl EnableOutcome {
    fn enabled(message: impl Into<String>) -> Self {
        Self {
            status_message: message.into(),
            need_refresh_token: false,
        }
    }
}

pub struct EnablementService {
    store: Arc<SessionStore>,
    refresher: Arc<dyn TokenRefresher>,
    policy: HeartbeatPolicy,
    require_token: bool,
}

impl EnablementService {
    pub fn new(
        store: Arc<SessionStore>,
        refresher: Arc<dyn TokenRefresher>,
        policy: HeartbeatPolicy,
        require_token: bool,
    ) -> Self {
        Self {
            store,
            refresher,
            policy,
            require_token,
        }
    }

    pub fn policy(&self) -> &HeartbeatPolicy {
        &self.policy
    }

    pub async fn enable(&self, request: EnableRequest) -> Result<EnableOutcome, PorterError> {
        let _transition = self.store.begin_transition().await;

        let now = Instant::now();
        let decision = self
            .store
            .inspect(|current| Session::decide(current, request.owner, now, &self.policy));

        match decision {
            EnableDecision::Heartbeat => {
                self.store.touch(request.owner, now);
                debug!(owner = %request.owner, "Heartbeat refreshed");
                Ok(EnableOutcome::enabled(format!(
                    "porter enabled by {}",
                    request.owner
                )))
            }
            EnableDecision::Conflict { owner } => {
                warn!(
                    owner = %owner,
                    caller = %request.owner,
                    "Rejected enable attempt while another owner is alive"
                );
                Err(PorterError::Conflict { owner })
            }
            EnableDecision::Acquire { evicting } => {
                let tokens = if self.require_token {
                    if request.refresh_token.is_empty() {
                        debug!(caller = %request.owner, "Enable attempt without refresh token");
                        return Ok(EnableOutcome {
                            status_message: "refresh token required".to_string(),
                            need_refresh_token: true,
                        });
                    }
                    self.exchange(&request).await?
                } else {
                    TokenPair::default()
                };

                self.store.replace(Session::new(request.owner, tokens));
                match evicting {
                    Some(stale) => info!(
                        owner = %request.owner,
                        evicted = %stale,
                        "Porter taken over from stale owner"
                    ),
                    None => info!(owner = %request.owner, "Porter enabled"),
                }
                Ok(EnableOutcome::enabled(format!(
                    "porter enabled by {}",
                    request.owner
                )))
            }
        }
    }

    async fn exchange(&self, request: &EnableRequest) -> Result<TokenPair, PorterError> {
        self.refresher
            .refresh(&request.refresh_token)
            .await
            .map_err(|e| {
                warn!(caller = %request.owner, error = %e, "Token exchange failed");
                PorterError::Upstream(e)
            })
    }
}
