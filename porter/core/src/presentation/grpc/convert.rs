// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Protobuf ↔ domain conversions for the porter gRPC service.
//!
//! Inbound conversions are total: a missing sub-message becomes its empty
//! domain value so that the authorization gate, not the transport, decides
//! whether the request is acceptable (liveness is always checked first).

use chrono::DateTime;

use crate::domain::capability::{
    AccountPlatform, CapabilityDescriptor, FeatureFlag, PorterInformation,
};
use crate::domain::request::{
    Account, AccountId, AppId, AppInfo, FeatureRequest, FeedItem, PullAccountAppRelationRequest,
    PullAccountRequest, PullAppRequest, PullFeedRequest, PushFeedItemsRequest, RelationType,
    SearchAppRequest,
};
use crate::infrastructure::proto::librarian::porter::v1 as pb;
use crate::infrastructure::proto::librarian::v1 as common;

impl From<common::AccountId> for AccountId {
    fn from(id: common::AccountId) -> Self {
        Self {
            platform: id.platform,
            platform_account_id: id.platform_account_id,
        }
    }
}

impl From<common::AppId> for AppId {
    fn from(id: common::AppId) -> Self {
        Self {
            internal: id.internal,
            source: id.source,
            source_app_id: id.source_app_id,
        }
    }
}

impl From<common::FeatureRequest> for FeatureRequest {
    fn from(request: common::FeatureRequest) -> Self {
        Self {
            id: request.id,
            region: request.region,
            config_json: request.config_json,
        }
    }
}

/// Unknown wire values map to `Unspecified`, which the gate rejects.
pub fn relation_from_wire(value: i32) -> RelationType {
    match common::AccountAppRelationType::try_from(value) {
        Ok(common::AccountAppRelationType::Owned) => RelationType::Owned,
        Ok(common::AccountAppRelationType::Favorited) => RelationType::Favorited,
        Ok(common::AccountAppRelationType::Unspecified) | Err(_) => RelationType::Unspecified,
    }
}

pub fn relation_to_wire(relation: RelationType) -> i32 {
    let wire = match relation {
        RelationType::Unspecified => common::AccountAppRelationType::Unspecified,
        RelationType::Owned => common::AccountAppRelationType::Owned,
        RelationType::Favorited => common::AccountAppRelationType::Favorited,
    };
    wire as i32
}

impl From<pb::PullAccountRequest> for PullAccountRequest {
    fn from(request: pb::PullAccountRequest) -> Self {
        Self {
            account_id: request.account_id.map(Into::into).unwrap_or_default(),
        }
    }
}

impl From<pb::PullAppRequest> for PullAppRequest {
    fn from(request: pb::PullAppRequest) -> Self {
        Self {
            app_id: request.app_id.map(Into::into).unwrap_or_default(),
        }
    }
}

impl From<pb::PullAccountAppRelationRequest> for PullAccountAppRelationRequest {
    fn from(request: pb::PullAccountAppRelationRequest) -> Self {
        Self {
            relation_type: relation_from_wire(request.relation_type),
            account_id: request.account_id.map(Into::into).unwrap_or_default(),
        }
    }
}

impl From<pb::SearchAppRequest> for SearchAppRequest {
    fn from(request: pb::SearchAppRequest) -> Self {
        Self { name: request.name }
    }
}

impl From<pb::PullFeedRequest> for PullFeedRequest {
    fn from(request: pb::PullFeedRequest) -> Self {
        Self {
            source: request.source.map(Into::into).unwrap_or_default(),
            channel_id: request.channel_id,
        }
    }
}

impl From<pb::PushFeedItemsRequest> for PushFeedItemsRequest {
    fn from(request: pb::PushFeedItemsRequest) -> Self {
        Self {
            destination: request.destination.map(Into::into).unwrap_or_default(),
            channel_id: request.channel_id,
            items: request.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<common::FeedItem> for FeedItem {
    fn from(item: common::FeedItem) -> Self {
        let published_at = match item.published_unix {
            0 => None,
            secs => DateTime::from_timestamp(secs, 0),
        };
        Self {
            id: item.id,
            title: item.title,
            link: item.link,
            description: item.description,
            authors: item.authors,
            published_at,
        }
    }
}

impl From<FeedItem> for common::FeedItem {
    fn from(item: FeedItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            link: item.link,
            description: item.description,
            authors: item.authors,
            published_unix: item.published_at.map(|t| t.timestamp()).unwrap_or_default(),
        }
    }
}

impl From<Account> for common::Account {
    fn from(account: Account) -> Self {
        Self {
            platform: account.platform,
            platform_account_id: account.platform_account_id,
            name: account.name,
            profile_url: account.profile_url,
            avatar_url: account.avatar_url,
        }
    }
}

impl From<AppInfo> for common::App {
    fn from(app: AppInfo) -> Self {
        Self {
            source: app.source,
            source_app_id: app.source_app_id,
            source_url: app.source_url,
            name: app.name,
            short_description: app.short_description,
            icon_image_url: app.icon_image_url,
            tags: app.tags,
        }
    }
}

impl From<&FeatureFlag> for common::FeatureFlag {
    fn from(flag: &FeatureFlag) -> Self {
        Self {
            id: flag.id.clone(),
            name: flag.name.clone(),
            description: flag.description.clone(),
            config_json_schema: flag.config_json_schema.clone(),
        }
    }
}

impl From<&AccountPlatform> for pb::AccountPlatform {
    fn from(platform: &AccountPlatform) -> Self {
        Self {
            platform: Some((&platform.flag).into()),
            relation_types: platform
                .relation_types
                .iter()
                .copied()
                .map(relation_to_wire)
                .collect(),
        }
    }
}

impl From<&CapabilityDescriptor> for pb::PorterFeatureSummary {
    fn from(descriptor: &CapabilityDescriptor) -> Self {
        Self {
            account_platforms: descriptor.account_platforms().iter().map(Into::into).collect(),
            app_sources: descriptor.app_sources().iter().map(Into::into).collect(),
            feed_sources: descriptor.feed_sources().iter().map(Into::into).collect(),
            notify_destinations: descriptor.notify_destinations().iter().map(Into::into).collect(),
        }
    }
}

impl From<&PorterInformation> for pb::GetPorterInformationResponse {
    fn from(information: &PorterInformation) -> Self {
        let identity = &information.identity;
        Self {
            binary_summary: Some(pb::PorterBinarySummary {
                name: identity.name.clone(),
                version: identity.version.clone(),
                description: identity.description.clone(),
            }),
            global_name: identity.global_name.clone(),
            feature_summary: Some((&information.descriptor).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sub_messages_become_empty_domain_values() {
        let request: PullAccountRequest = pb::PullAccountRequest { account_id: None }.into();
        assert_eq!(request.account_id, AccountId::default());

        let request: PullFeedRequest = pb::PullFeedRequest {
            source: None,
            channel_id: "c".to_string(),
        }
        .into();
        assert!(request.source.id.is_empty());
    }

    #[test]
    fn unknown_relation_values_are_unspecified() {
        assert_eq!(relation_from_wire(1), RelationType::Owned);
        assert_eq!(relation_from_wire(2), RelationType::Favorited);
        assert_eq!(relation_from_wire(99), RelationType::Unspecified);
        assert_eq!(relation_to_wire(RelationType::Favorited), 2);
    }

    #[test]
    fn feed_item_timestamps_use_zero_for_unknown() {
        let item: FeedItem = common::FeedItem {
            published_unix: 0,
            ..Default::default()
        }
        .into();
        assert!(item.published_at.is_none());

        let item: FeedItem = common::FeedItem {
            published_unix: 1_700_000_000,
            ..Default::default()
        }
        .into();
        let wire: common::FeedItem = item.into();
        assert_eq!(wire.published_unix, 1_700_000_000);
    }
}
