// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use tuihub_porter_core::application::{PorterOptions, PorterService};
use tuihub_porter_core::domain::*;

/// Every handler invocation, with the request exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PullAccount(PullAccountRequest),
    PullApp(PullAppRequest),
    PullAccountAppRelation(PullAccountAppRelationRequest),
    SearchApp(SearchAppRequest),
    PullFeed(PullFeedRequest),
    PushFeedItems(PushFeedItemsRequest),
}

#[derive(Default)]
pub struct RecordingHandler {
    calls: Mutex<Vec<Call>>,
    /// Simulated work inside `pull_account`.
    pub pull_account_delay: Option<Duration>,
}

impl RecordingHandler {
    pub fn with_pull_account_delay(delay: Duration) -> Self {
        Self {
            pull_account_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

pub fn counter_strike() -> AppInfo {
    AppInfo {
        source: "steam".to_string(),
        source_app_id: "730".to_string(),
        name: "Counter-Strike 2".to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn pull_account(&self, request: PullAccountRequest) -> Result<Account, PorterError> {
        self.record(Call::PullAccount(request.clone()));
        if let Some(delay) = self.pull_account_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Account {
            platform: request.account_id.platform,
            platform_account_id: request.account_id.platform_account_id,
            name: "gaben".to_string(),
            ..Default::default()
        })
    }

    async fn pull_app(&self, request: PullAppRequest) -> Result<AppInfo, PorterError> {
        self.record(Call::PullApp(request));
        Ok(counter_strike())
    }

    async fn pull_account_app_relation(
        &self,
        request: PullAccountAppRelationRequest,
    ) -> Result<Vec<AppInfo>, PorterError> {
        self.record(Call::PullAccountAppRelation(request));
        Ok(vec![counter_strike()])
    }

    async fn search_app(&self, request: SearchAppRequest) -> Result<Vec<AppInfo>, PorterError> {
        self.record(Call::SearchApp(request));
        Err(PorterError::NotImplemented("search_app"))
    }

    async fn pull_feed(&self, request: PullFeedRequest) -> Result<Vec<FeedItem>, PorterError> {
        self.record(Call::PullFeed(request));
        Err(anyhow::anyhow!("feed backend unreachable").into())
    }

    async fn push_feed_items(&self, request: PushFeedItemsRequest) -> Result<(), PorterError> {
        self.record(Call::PushFeedItems(request));
        Ok(())
    }
}

/// Token refresher that issues `tok1`, `tok2`, ... or fails on demand.
#[derive(Default)]
pub struct FakeRefresher {
    calls: AtomicUsize,
    failure: Mutex<Option<(tonic::Code, String)>>,
    pub delay: Option<Duration>,
    seen: Mutex<Vec<String>>,
}

impl FakeRefresher {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_refresh_tokens(&self) -> Vec<String> {
        self.seen.lock().clone()
    }

    /// Make every following exchange fail with `status`.
    pub fn fail_with(&self, status: tonic::Status) {
        *self.failure.lock() = Some((status.code(), status.message().to_string()));
    }

    pub fn recover(&self) {
        *self.failure.lock() = None;
    }
}

#[async_trait]
impl TokenRefresher for FakeRefresher {
    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<TokenPair> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.seen.lock().push(refresh_token.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failure.lock().clone();
        if let Some((code, message)) = failure {
            return Err(anyhow::Error::new(tonic::Status::new(code, message)));
        }
        Ok(TokenPair::new(format!("tok{n}"), format!("refresh{n}")))
    }
}

pub fn steam_descriptor() -> CapabilityDescriptor {
    CapabilityDescriptor::builder()
        .account_platform(FeatureFlag::new("steam", "Steam"), [RelationType::Owned])
        .app_source(FeatureFlag::new("steam", "Steam Store"))
        .feed_source(FeatureFlag::new("rss", "RSS"))
        .notify_destination(FeatureFlag::new("telegram", "Telegram"))
        .build()
        .expect("fixture descriptor is valid")
}

pub fn identity() -> PorterIdentity {
    PorterIdentity::new("steam-porter", "0.1.0", "steam").expect("fixture identity is valid")
}

pub struct Fixture {
    pub service: Arc<PorterService>,
    pub handler: Arc<RecordingHandler>,
    pub refresher: Arc<FakeRefresher>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(
            steam_descriptor(),
            RecordingHandler::default(),
            FakeRefresher::default(),
            PorterOptions::default(),
        )
    }

    pub fn build(
        descriptor: CapabilityDescriptor,
        handler: RecordingHandler,
        refresher: FakeRefresher,
        options: PorterOptions,
    ) -> Self {
        let handler = Arc::new(handler);
        let refresher = Arc::new(refresher);
        let service = Arc::new(PorterService::new(
            identity(),
            descriptor,
            handler.clone(),
            refresher.clone(),
            options,
        ));
        Self {
            service,
            handler,
            refresher,
        }
    }

    /// Enable the porter for `owner`, panicking if that fails.
    pub async fn enable(&self, owner: i64) {
        let outcome = self
            .service
            .enable(tuihub_porter_core::application::EnableRequest::new(
                OwnerId(owner),
                "abc",
            ))
            .await
            .expect("enable succeeds");
        assert!(!outcome.need_refresh_token);
    }
}
