// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Enablement Session
//!
//! A porter serves exactly one Sephirah instance at a time. The caller that
//! enables it becomes the session owner; the session stores the tokens issued
//! for the porter and the time the owner last proved it was alive.
//!
//! ## Lifecycle
//!
//! ```text
//! Disabled (no Session)
//!   └─ EnablePorter(owner, refresh_token) + successful token exchange
//! Enabled { owner }
//!   ├─ EnablePorter(owner)            → heartbeat refreshed, no exchange
//!   ├─ EnablePorter(other), fresh     → Conflict, unchanged
//!   └─ EnablePorter(other), stale     → replaced after a new exchange
//! ```
//!
//! There is no transition back to Disabled short of a process restart.
//! [`Session::decide`] is the pure half of the state machine; the locking and
//! token exchange live in [`crate::application::enablement`].

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Opaque id of the Sephirah instance that enabled the porter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access/refresh credential pair issued by Sephirah.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Heartbeat timing constants.
///
/// Only `timeout` is consulted: an owner whose last heartbeat is at least
/// `timeout` old may be replaced by a competing caller. `interval` and
/// `downgrade` are advertised to integrators but gate nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatPolicy {
    /// How often a live owner is expected to re-enable.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    #[serde(with = "humantime_serde")]
    pub downgrade: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HeartbeatPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            downgrade: Duration::from_secs(30),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub owner: OwnerId,
    pub tokens: TokenPair,
    pub enabled_at: DateTime<Utc>,
    pub last_heartbeat: Instant,
}

/// What an `EnablePorter` call should do given the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableDecision {
    /// Same owner: refresh the heartbeat only.
    Heartbeat,
    /// Live session held by someone else.
    Conflict { owner: OwnerId },
    /// Run a token exchange and install a new session. `evicting` names a
    /// stale owner being replaced.
    Acquire { evicting: Option<OwnerId> },
}

impl Session {
    pub fn new(owner: OwnerId, tokens: TokenPair) -> Self {
        Self {
            owner,
            tokens,
            enabled_at: Utc::now(),
            last_heartbeat: Instant::now(),
        }
    }

    pub fn heartbeat_age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_heartbeat)
    }

    pub fn is_stale(&self, now: Instant, policy: &HeartbeatPolicy) -> bool {
        self.heartbeat_age(now) >= policy.timeout
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_heartbeat = now;
    }

    pub fn decide(
        current: Option<&Session>,
        caller: OwnerId,
        now: Instant,
        policy: &HeartbeatPolicy,
    ) -> EnableDecision {
        match current {
            None => EnableDecision::Acquire { evicting: None },
            Some(session) if session.owner == caller => EnableDecision::Heartbeat,
            Some(session) if session.is_stale(now, policy) => EnableDecision::Acquire {
                evicting: Some(session.owner),
            },
            Some(session) => EnableDecision::Conflict {
                owner: session.owner,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(owner: i64) -> Session {
        Session::new(OwnerId(owner), TokenPair::new("access", "refresh"))
    }

    #[tokio::test(start_paused = true)]
    async fn decide_covers_every_transition() {
        let policy = HeartbeatPolicy::default();
        let held = session(1);

        assert_eq!(
            Session::decide(None, OwnerId(1), Instant::now(), &policy),
            EnableDecision::Acquire { evicting: None }
        );
        assert_eq!(
            Session::decide(Some(&held), OwnerId(1), Instant::now(), &policy),
            EnableDecision::Heartbeat
        );
        assert_eq!(
            Session::decide(Some(&held), OwnerId(2), Instant::now(), &policy),
            EnableDecision::Conflict { owner: OwnerId(1) }
        );

        tokio::time::advance(policy.timeout).await;
        assert_eq!(
            Session::decide(Some(&held), OwnerId(2), Instant::now(), &policy),
            EnableDecision::Acquire {
                evicting: Some(OwnerId(1))
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn downgrade_threshold_does_not_allow_takeover() {
        let policy = HeartbeatPolicy::default();
        let held = session(1);

        tokio::time::advance(policy.downgrade + Duration::from_secs(1)).await;
        assert!(!held.is_stale(Instant::now(), &policy));
        assert_eq!(
            Session::decide(Some(&held), OwnerId(2), Instant::now(), &policy),
            EnableDecision::Conflict { owner: OwnerId(1) }
        );
    }

    #[test]
    fn token_debug_output_is_redacted() {
        let rendered = format!("{:?}", TokenPair::new("secret-a", "secret-r"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn heartbeat_policy_reads_humantime_durations() {
        let policy: HeartbeatPolicy =
            serde_yaml::from_str("interval: 5s\ndowngrade: 15s\ntimeout: 2m").unwrap();
        assert_eq!(policy.timeout, Duration::from_secs(120));
        assert_eq!(policy.interval, Duration::from_secs(5));
    }
}
