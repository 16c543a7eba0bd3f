// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! gRPC Server Implementation for TuiHub porters
//! Exposes GetPorterInformation, EnablePorter and the six gated domain operations

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::instrument;

use crate::application::enablement::EnableRequest;
use crate::application::porter_service::PorterService;
use crate::domain::session::OwnerId;
use crate::infrastructure::proto::librarian::porter::v1 as pb;

use pb::librarian_porter_service_server::{LibrarianPorterService, LibrarianPorterServiceServer};

/// Implementation of the LibrarianPorterService gRPC service
pub struct PorterGrpcService {
    service: Arc<PorterService>,
}

impl PorterGrpcService {
    pub fn new(service: Arc<PorterService>) -> Self {
        Self { service }
    }

    /// Create a gRPC server instance
    pub fn into_server(self) -> LibrarianPorterServiceServer<Self> {
        LibrarianPorterServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl LibrarianPorterService for PorterGrpcService {
    async fn get_porter_information(
        &self,
        _request: Request<pb::GetPorterInformationRequest>,
    ) -> Result<Response<pb::GetPorterInformationResponse>, Status> {
        Ok(Response::new(self.service.information().into()))
    }

    #[instrument(name = "porter.enable", skip_all)]
    async fn enable_porter(
        &self,
        request: Request<pb::EnablePorterRequest>,
    ) -> Result<Response<pb::EnablePorterResponse>, Status> {
        let req = request.into_inner();
        let outcome = self
            .service
            .enable(EnableRequest::new(OwnerId(req.sephirah_id), req.refresh_token))
            .await?;

        Ok(Response::new(pb::EnablePorterResponse {
            status_message: outcome.status_message,
            need_refresh_token: outcome.need_refresh_token,
        }))
    }

    #[instrument(name = "porter.pull_account", skip_all)]
    async fn pull_account(
        &self,
        request: Request<pb::PullAccountRequest>,
    ) -> Result<Response<pb::PullAccountResponse>, Status> {
        let account = self
            .service
            .gate()
            .pull_account(request.into_inner().into())
            .await?;

        Ok(Response::new(pb::PullAccountResponse {
            account: Some(account.into()),
        }))
    }

    #[instrument(name = "porter.pull_app", skip_all)]
    async fn pull_app(
        &self,
        request: Request<pb::PullAppRequest>,
    ) -> Result<Response<pb::PullAppResponse>, Status> {
        let app = self
            .service
            .gate()
            .pull_app(request.into_inner().into())
            .await?;

        Ok(Response::new(pb::PullAppResponse {
            app: Some(app.into()),
        }))
    }

    #[instrument(name = "porter.pull_account_app_relation", skip_all)]
    async fn pull_account_app_relation(
        &self,
        request: Request<pb::PullAccountAppRelationRequest>,
    ) -> Result<Response<pb::PullAccountAppRelationResponse>, Status> {
        let apps = self
            .service
            .gate()
            .pull_account_app_relation(request.into_inner().into())
            .await?;

        Ok(Response::new(pb::PullAccountAppRelationResponse {
            apps: apps.into_iter().map(Into::into).collect(),
        }))
    }

    #[instrument(name = "porter.search_app", skip_all)]
    async fn search_app(
        &self,
        request: Request<pb::SearchAppRequest>,
    ) -> Result<Response<pb::SearchAppResponse>, Status> {
        let apps = self
            .service
            .gate()
            .search_app(request.into_inner().into())
            .await?;

        Ok(Response::new(pb::SearchAppResponse {
            apps: apps.into_iter().map(Into::into).collect(),
        }))
    }

    #[instrument(name = "porter.pull_feed", skip_all)]
    async fn pull_feed(
        &self,
        request: Request<pb::PullFeedRequest>,
    ) -> Result<Response<pb::PullFeedResponse>, Status> {
        let items = self
            .service
            .gate()
            .pull_feed(request.into_inner().into())
            .await?;

        Ok(Response::new(pb::PullFeedResponse {
            items: items.into_iter().map(Into::into).collect(),
        }))
    }

    #[instrument(name = "porter.push_feed_items", skip_all)]
    async fn push_feed_items(
        &self,
        request: Request<pb::PushFeedItemsRequest>,
    ) -> Result<Response<pb::PushFeedItemsResponse>, Status> {
        self.service
            .gate()
            .push_feed_items(request.into_inner().into())
            .await?;

        Ok(Response::new(pb::PushFeedItemsResponse {}))
    }
}
