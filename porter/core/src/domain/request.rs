// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Request Envelopes and Domain Payloads
//!
//! Transport-independent shapes of the six gated operations, plus the payloads
//! a [`crate::domain::handler::Handler`] returns. The gRPC layer converts to and
//! from these in `presentation::grpc::convert`.
//!
//! Each request knows how to check its own shape (`validate`). Validation only
//! looks at the request itself; capability membership is checked separately
//! against the [`crate::domain::capability::CapabilityDescriptor`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::PorterError;

/// Account on an external platform, e.g. `steam` / `76561198000000000`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId {
    pub platform: String,
    pub platform_account_id: String,
}

impl AccountId {
    pub fn new(platform: impl Into<String>, platform_account_id: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            platform_account_id: platform_account_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), PorterError> {
        if self.platform.is_empty() {
            return Err(PorterError::invalid_argument("account id: platform must not be empty"));
        }
        if self.platform_account_id.is_empty() {
            return Err(PorterError::invalid_argument(
                "account id: platform_account_id must not be empty",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId {
    /// Set for apps owned by Sephirah itself; porters never serve these.
    pub internal: bool,
    pub source: String,
    pub source_app_id: String,
}

impl AppId {
    pub fn new(source: impl Into<String>, source_app_id: impl Into<String>) -> Self {
        Self {
            internal: false,
            source: source.into(),
            source_app_id: source_app_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), PorterError> {
        if self.internal {
            return Err(PorterError::invalid_argument(
                "app id: internal apps are not served by porters",
            ));
        }
        if self.source.is_empty() {
            return Err(PorterError::invalid_argument("app id: source must not be empty"));
        }
        if self.source_app_id.is_empty() {
            return Err(PorterError::invalid_argument("app id: source_app_id must not be empty"));
        }
        Ok(())
    }
}

/// How an account relates to an app.
///
/// `Unspecified` is the wire default and is never a valid request value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    #[default]
    Unspecified,
    Owned,
    Favorited,
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Owned => "OWNED",
            Self::Favorited => "FAVORITED",
        };
        f.write_str(name)
    }
}

/// Reference to a feed source or notify destination, with caller-supplied config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub id: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub config_json: String,
}

impl FeatureRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    fn validate(&self, field: &str) -> Result<(), PorterError> {
        if self.id.is_empty() {
            return Err(PorterError::invalid_argument(format!("{field}: id must not be empty")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullAccountRequest {
    pub account_id: AccountId,
}

impl PullAccountRequest {
    pub fn validate(&self) -> Result<(), PorterError> {
        self.account_id.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullAppRequest {
    pub app_id: AppId,
}

impl PullAppRequest {
    pub fn validate(&self) -> Result<(), PorterError> {
        self.app_id.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullAccountAppRelationRequest {
    pub relation_type: RelationType,
    pub account_id: AccountId,
}

impl PullAccountAppRelationRequest {
    pub fn validate(&self) -> Result<(), PorterError> {
        if self.relation_type == RelationType::Unspecified {
            return Err(PorterError::invalid_argument("relation type must be specified"));
        }
        self.account_id.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAppRequest {
    pub name: String,
}

impl SearchAppRequest {
    pub fn validate(&self) -> Result<(), PorterError> {
        if self.name.is_empty() {
            return Err(PorterError::invalid_argument("app name must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullFeedRequest {
    pub source: FeatureRequest,
    pub channel_id: String,
}

impl PullFeedRequest {
    pub fn validate(&self) -> Result<(), PorterError> {
        self.source.validate("feed source")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushFeedItemsRequest {
    pub destination: FeatureRequest,
    pub channel_id: String,
    pub items: Vec<FeedItem>,
}

impl PushFeedItemsRequest {
    pub fn validate(&self) -> Result<(), PorterError> {
        self.destination.validate("notify destination")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub platform: String,
    pub platform_account_id: String,
    pub name: String,
    pub profile_url: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub source: String,
    pub source_app_id: String,
    pub source_url: String,
    pub name: String,
    pub short_description: String,
    pub icon_image_url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub authors: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: PorterError) -> String {
        match err {
            PorterError::InvalidArgument(msg) => msg,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn account_id_requires_both_fields() {
        assert!(AccountId::new("steam", "1").validate().is_ok());
        assert!(message(AccountId::new("", "1").validate().unwrap_err()).contains("platform"));
        assert!(message(AccountId::new("steam", "").validate().unwrap_err())
            .contains("platform_account_id"));
    }

    #[test]
    fn app_id_rejects_internal_apps() {
        let mut id = AppId::new("steam", "730");
        assert!(id.validate().is_ok());

        id.internal = true;
        assert!(message(id.validate().unwrap_err()).contains("internal"));
    }

    #[test]
    fn relation_request_rejects_unspecified_before_account() {
        let req = PullAccountAppRelationRequest {
            relation_type: RelationType::Unspecified,
            account_id: AccountId::default(),
        };
        assert!(message(req.validate().unwrap_err()).contains("relation type"));
    }

    #[test]
    fn feed_requests_need_an_id() {
        let pull = PullFeedRequest::default();
        assert!(message(pull.validate().unwrap_err()).starts_with("feed source"));

        let push = PushFeedItemsRequest {
            destination: FeatureRequest::new("telegram"),
            ..Default::default()
        };
        assert!(push.validate().is_ok());
    }
}
