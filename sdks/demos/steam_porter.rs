// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Minimal porter serving a fixed Steam library.
//!
//! ```text
//! SERVER_ADDRESS=127.0.0.1:9000 PORTER_REQUIRE_TOKEN=false \
//!     cargo run -p tuihub-porter-sdk --example steam_porter
//! ```
//!
//! Pass a YAML settings file as the first argument to override the defaults.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tuihub_porter_sdk::*;

struct StaticLibrary;

fn portal() -> AppInfo {
    AppInfo {
        source: "steam".to_string(),
        source_app_id: "400".to_string(),
        name: "Portal".to_string(),
        tags: vec!["puzzle".to_string()],
        ..Default::default()
    }
}

#[async_trait]
impl Handler for StaticLibrary {
    async fn pull_account(&self, request: PullAccountRequest) -> Result<Account, PorterError> {
        Ok(Account {
            platform: request.account_id.platform,
            platform_account_id: request.account_id.platform_account_id,
            name: "demo".to_string(),
            ..Default::default()
        })
    }

    async fn pull_app(&self, request: PullAppRequest) -> Result<AppInfo, PorterError> {
        if request.app_id.source_app_id != "400" {
            let missing = request.app_id.source_app_id;
            return Err(anyhow::anyhow!("app {missing} not in library").into());
        }
        Ok(portal())
    }

    async fn pull_account_app_relation(
        &self,
        _request: PullAccountAppRelationRequest,
    ) -> Result<Vec<AppInfo>, PorterError> {
        Ok(vec![portal()])
    }

    async fn search_app(&self, request: SearchAppRequest) -> Result<Vec<AppInfo>, PorterError> {
        let app = portal();
        let needle = request.name.to_lowercase();
        Ok(if app.name.to_lowercase().contains(&needle) {
            vec![app]
        } else {
            Vec::new()
        })
    }

    async fn pull_feed(&self, _request: PullFeedRequest) -> Result<Vec<FeedItem>, PorterError> {
        Err(PorterError::NotImplemented("pull_feed"))
    }

    async fn push_feed_items(&self, _request: PushFeedItemsRequest) -> Result<(), PorterError> {
        Err(PorterError::NotImplemented("push_feed_items"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut settings = match std::env::args().nth(1) {
        Some(path) => PorterSettings::from_yaml_file(path)?,
        None => PorterSettings::default(),
    };
    settings.apply_env_overrides()?;
    init_logging(&settings.log_level)?;

    let identity = PorterIdentity::new("steam-porter", env!("CARGO_PKG_VERSION"), "steam-demo")?
        .with_description("Serves a fixed Steam library");
    let descriptor = CapabilityDescriptor::builder()
        .account_platform(FeatureFlag::new("steam", "Steam"), [RelationType::Owned])
        .app_source(FeatureFlag::new("steam", "Steam Store"))
        .build()?;

    let porter = PorterBuilder::new(identity, descriptor, Arc::new(StaticLibrary))
        .settings(settings)
        .build()?;

    porter
        .serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}
