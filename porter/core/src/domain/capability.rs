// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Capability Descriptor
//!
//! Static declaration of what a porter can serve: account platforms (each with
//! the account/app relation types it can resolve), app sources, feed sources
//! and notify destinations. Built once at startup and shared read-only.
//!
//! ## Invariants
//!
//! - Ids are non-empty and unique within their list.
//! - A platform never lists the same relation type twice and never lists
//!   [`RelationType::Unspecified`].
//!
//! Both are checked at construction ([`CapabilityDescriptorBuilder::build`] and
//! the `Deserialize` impl share the same validation), so lookups never have to
//! deal with duplicates. Lookups are linear scans; descriptors hold tens of
//! entries at most.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::request::RelationType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("{list} contains an entry with an empty id")]
    EmptyId { list: &'static str },

    #[error("{list} contains duplicate id '{id}'")]
    DuplicateId { list: &'static str, id: String },

    #[error("account platform '{platform}' lists relation type {relation} more than once")]
    DuplicateRelationType {
        platform: String,
        relation: RelationType,
    },

    #[error("account platform '{platform}' lists the unspecified relation type")]
    UnspecifiedRelationType { platform: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("global name is empty")]
    EmptyGlobalName,
}

/// One supported feature (source, destination or platform) as advertised to Sephirah.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlag {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON schema of the per-request `config_json`, empty when unconfigurable.
    #[serde(default)]
    pub config_json_schema: String,
}

impl FeatureFlag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPlatform {
    #[serde(flatten)]
    pub flag: FeatureFlag,
    #[serde(default)]
    pub relation_types: Vec<RelationType>,
}

impl AccountPlatform {
    pub fn new(flag: FeatureFlag, relation_types: impl IntoIterator<Item = RelationType>) -> Self {
        Self {
            flag,
            relation_types: relation_types.into_iter().collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.flag.id
    }

    pub fn allows(&self, relation: RelationType) -> bool {
        self.relation_types.contains(&relation)
    }
}

/// Validated, immutable capability declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DescriptorSpec")]
pub struct CapabilityDescriptor {
    account_platforms: Vec<AccountPlatform>,
    app_sources: Vec<FeatureFlag>,
    feed_sources: Vec<FeatureFlag>,
    notify_destinations: Vec<FeatureFlag>,
}

impl CapabilityDescriptor {
    pub fn builder() -> CapabilityDescriptorBuilder {
        CapabilityDescriptorBuilder::default()
    }

    pub fn account_platforms(&self) -> &[AccountPlatform] {
        &self.account_platforms
    }

    pub fn app_sources(&self) -> &[FeatureFlag] {
        &self.app_sources
    }

    pub fn feed_sources(&self) -> &[FeatureFlag] {
        &self.feed_sources
    }

    pub fn notify_destinations(&self) -> &[FeatureFlag] {
        &self.notify_destinations
    }

    pub fn account_platform(&self, platform: &str) -> Option<&AccountPlatform> {
        self.account_platforms.iter().find(|p| p.id() == platform)
    }

    pub fn supports_app_source(&self, source: &str) -> bool {
        self.app_sources.iter().any(|s| s.id == source)
    }

    pub fn supports_feed_source(&self, source: &str) -> bool {
        self.feed_sources.iter().any(|s| s.id == source)
    }

    pub fn supports_notify_destination(&self, destination: &str) -> bool {
        self.notify_destinations.iter().any(|d| d.id == destination)
    }

    fn validate(&self) -> Result<(), DescriptorError> {
        ensure_unique("account_platforms", self.account_platforms.iter().map(AccountPlatform::id))?;
        ensure_unique("app_sources", self.app_sources.iter().map(|f| f.id.as_str()))?;
        ensure_unique("feed_sources", self.feed_sources.iter().map(|f| f.id.as_str()))?;
        ensure_unique(
            "notify_destinations",
            self.notify_destinations.iter().map(|f| f.id.as_str()),
        )?;

        for platform in &self.account_platforms {
            let mut seen = HashSet::new();
            for relation in &platform.relation_types {
                if *relation == RelationType::Unspecified {
                    return Err(DescriptorError::UnspecifiedRelationType {
                        platform: platform.id().to_string(),
                    });
                }
                if !seen.insert(*relation) {
                    return Err(DescriptorError::DuplicateRelationType {
                        platform: platform.id().to_string(),
                        relation: *relation,
                    });
                }
            }
        }
        Ok(())
    }
}

fn ensure_unique<'a>(
    list: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DescriptorError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(DescriptorError::EmptyId { list });
        }
        if !seen.insert(id) {
            return Err(DescriptorError::DuplicateId {
                list,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Unvalidated wire/config form of [`CapabilityDescriptor`].
#[derive(Debug, Default, Deserialize)]
struct DescriptorSpec {
    #[serde(default)]
    account_platforms: Vec<AccountPlatform>,
    #[serde(default)]
    app_sources: Vec<FeatureFlag>,
    #[serde(default)]
    feed_sources: Vec<FeatureFlag>,
    #[serde(default)]
    notify_destinations: Vec<FeatureFlag>,
}

impl TryFrom<DescriptorSpec> for CapabilityDescriptor {
    type Error = DescriptorError;

    fn try_from(spec: DescriptorSpec) -> Result<Self, Self::Error> {
        let descriptor = Self {
            account_platforms: spec.account_platforms,
            app_sources: spec.app_sources,
            feed_sources: spec.feed_sources,
            notify_destinations: spec.notify_destinations,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

#[derive(Debug, Default)]
pub struct CapabilityDescriptorBuilder {
    spec: DescriptorSpec,
}

impl CapabilityDescriptorBuilder {
    pub fn account_platform(
        mut self,
        flag: FeatureFlag,
        relation_types: impl IntoIterator<Item = RelationType>,
    ) -> Self {
        self.spec
            .account_platforms
            .push(AccountPlatform::new(flag, relation_types));
        self
    }

    pub fn app_source(mut self, flag: FeatureFlag) -> Self {
        self.spec.app_sources.push(flag);
        self
    }

    pub fn feed_source(mut self, flag: FeatureFlag) -> Self {
        self.spec.feed_sources.push(flag);
        self
    }

    pub fn notify_destination(mut self, flag: FeatureFlag) -> Self {
        self.spec.notify_destinations.push(flag);
        self
    }

    pub fn build(self) -> Result<CapabilityDescriptor, DescriptorError> {
        CapabilityDescriptor::try_from(self.spec)
    }
}

/// Binary identity reported by `GetPorterInformation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PorterIdentity {
    pub name: String,
    pub version: String,
    /// Stable name Sephirah uses to tell porter deployments apart.
    pub global_name: String,
    #[serde(default)]
    pub description: String,
}

impl PorterIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        global_name: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let identity = Self {
            name: name.into(),
            version: version.into(),
            global_name: global_name.into(),
            description: String::new(),
        };
        if identity.global_name.is_empty() {
            return Err(IdentityError::EmptyGlobalName);
        }
        Ok(identity)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Everything `GetPorterInformation` returns. Never changes after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PorterInformation {
    pub identity: PorterIdentity,
    pub descriptor: CapabilityDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steam() -> FeatureFlag {
        FeatureFlag::new("steam", "Steam")
    }

    #[test]
    fn lookups_find_declared_entries() {
        let descriptor = CapabilityDescriptor::builder()
            .account_platform(steam(), [RelationType::Owned])
            .app_source(FeatureFlag::new("steam", "Steam Store"))
            .feed_source(FeatureFlag::new("rss", "RSS"))
            .notify_destination(FeatureFlag::new("telegram", "Telegram"))
            .build()
            .unwrap();

        let platform = descriptor.account_platform("steam").unwrap();
        assert!(platform.allows(RelationType::Owned));
        assert!(!platform.allows(RelationType::Favorited));
        assert!(descriptor.account_platform("gog").is_none());

        assert!(descriptor.supports_app_source("steam"));
        assert!(descriptor.supports_feed_source("rss"));
        assert!(!descriptor.supports_feed_source("atom"));
        assert!(descriptor.supports_notify_destination("telegram"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CapabilityDescriptor::builder()
            .feed_source(FeatureFlag::new("rss", "RSS"))
            .feed_source(FeatureFlag::new("rss", "RSS again"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateId {
                list: "feed_sources",
                id: "rss".to_string()
            }
        );
    }

    #[test]
    fn duplicate_platforms_and_destinations_are_rejected() {
        let err = CapabilityDescriptor::builder()
            .account_platform(steam(), [RelationType::Owned])
            .account_platform(FeatureFlag::new("steam", "Steam (EU)"), [RelationType::Favorited])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateId {
                list: "account_platforms",
                id: "steam".to_string()
            }
        );

        let err = CapabilityDescriptor::builder()
            .notify_destination(FeatureFlag::new("telegram", "Telegram"))
            .notify_destination(FeatureFlag::new("telegram", "Telegram bot"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateId {
                list: "notify_destinations",
                id: "telegram".to_string()
            }
        );
    }

    #[test]
    fn relation_types_are_checked_per_platform() {
        let err = CapabilityDescriptor::builder()
            .account_platform(steam(), [RelationType::Owned, RelationType::Owned])
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::DuplicateRelationType { .. }));

        let err = CapabilityDescriptor::builder()
            .account_platform(steam(), [RelationType::Unspecified])
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::UnspecifiedRelationType { .. }));
    }

    #[test]
    fn empty_ids_are_rejected() {
        let err = CapabilityDescriptor::builder()
            .app_source(FeatureFlag::default())
            .build()
            .unwrap_err();
        assert_eq!(err, DescriptorError::EmptyId { list: "app_sources" });
    }

    #[test]
    fn deserialization_runs_the_same_validation() {
        let yaml = r#"
account_platforms:
  - id: steam
    name: Steam
    relation_types: [OWNED]
feed_sources:
  - id: rss
"#;
        let descriptor: CapabilityDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert!(descriptor.account_platform("steam").unwrap().allows(RelationType::Owned));
        assert!(descriptor.supports_feed_source("rss"));

        let yaml = r#"
app_sources:
  - id: steam
  - id: steam
"#;
        assert!(serde_yaml::from_str::<CapabilityDescriptor>(yaml).is_err());
    }

    #[test]
    fn identity_requires_global_name() {
        assert_eq!(
            PorterIdentity::new("steam-porter", "1.0.0", "").unwrap_err(),
            IdentityError::EmptyGlobalName
        );
        let identity = PorterIdentity::new("steam-porter", "1.0.0", "steam").unwrap();
        assert_eq!(identity.global_name, "steam");
    }
}
