// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use parking_lot::RwLock;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

use crate::domain::session::{OwnerId, Session};

/// Shared holder of the porter's single enablement session.
///
/// Two locks with different jobs:
/// - `current` guards the session value. It is only held for short,
///   non-async critical sections, so liveness checks never wait on I/O.
/// - `transition` serializes enablement. It is held across the outbound token
///   exchange so two callers can never both observe "no owner" and both win.
///
/// One instance is created per porter and shared (via `Arc`) between the
/// enablement service and the authorization gate.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    transition: Mutex<()>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn owner(&self) -> Option<OwnerId> {
        self.current.read().as_ref().map(|s| s.owner)
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|s| s.tokens.access_token.clone())
    }

    /// Copy of the current session, if any.
    pub fn snapshot(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub(crate) fn inspect<R>(&self, f: impl FnOnce(Option<&Session>) -> R) -> R {
        f(self.current.read().as_ref())
    }

    /// Wait for exclusive right to change the session.
    pub(crate) async fn begin_transition(&self) -> MutexGuard<'_, ()> {
        self.transition.lock().await
    }

    pub(crate) fn replace(&self, session: Session) -> Option<Session> {
        self.current.write().replace(session)
    }

    /// Refresh the heartbeat if `owner` still holds the session.
    pub(crate) fn touch(&self, owner: OwnerId, now: Instant) -> bool {
        match self.current.write().as_mut() {
            Some(session) if session.owner == owner => {
                session.touch(now);
                true
            }
            _ => false,
        }
    }
}
