// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Porter Error Taxonomy
//!
//! Every failure a porter can report to its caller. Gate checks fail fast with
//! one of the first four variants before the [`crate::domain::handler::Handler`]
//! is reached; `Upstream` comes from the token exchange during enablement and
//! `Handler` / `NotImplemented` are produced by integrator code and passed
//! through untouched.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Error types shared by the session, gate and handler seams

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::session::OwnerId;

/// Descriptor set a request identifier was looked up in.
///
/// Carried by [`PorterError::Unsupported`] so callers can tell a missing
/// platform apart from a missing relation type on a known platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityCategory {
    AccountPlatform,
    AppSource,
    FeedSource,
    NotifyDestination,
    RelationType,
}

impl CapabilityCategory {
    /// Stable machine-readable key, e.g. `relation_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountPlatform => "account_platform",
            Self::AppSource => "app_source",
            Self::FeedSource => "feed_source",
            Self::NotifyDestination => "notify_destination",
            Self::RelationType => "relation_type",
        }
    }
}

impl fmt::Display for CapabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AccountPlatform => "account platform",
            Self::AppSource => "app source",
            Self::FeedSource => "feed source",
            Self::NotifyDestination => "notify destination",
            Self::RelationType => "relation type",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum PorterError {
    /// No caller has enabled this porter.
    #[error("Unauthorized caller: porter is not enabled")]
    Unauthorized,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported {category}: {id}")]
    Unsupported {
        category: CapabilityCategory,
        id: String,
    },

    /// Another owner holds the session and its heartbeat is still fresh.
    #[error("Porter already enabled by {owner}")]
    Conflict { owner: OwnerId },

    #[error("Token exchange failed: {0}")]
    Upstream(#[source] anyhow::Error),

    /// The integrator does not provide this operation.
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl PorterError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported(category: CapabilityCategory, id: impl Into<String>) -> Self {
        Self::Unsupported {
            category,
            id: id.into(),
        }
    }

    /// Category of an `Unsupported` error, `None` for every other variant.
    pub fn unsupported_category(&self) -> Option<CapabilityCategory> {
        match self {
            Self::Unsupported { category, .. } => Some(*category),
            _ => None,
        }
    }
}
