// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::info;

use tuihub_porter_core::application::PorterService;
use tuihub_porter_core::domain::{
    CapabilityDescriptor, Handler, HeartbeatPolicy, PorterError, PorterIdentity, TokenRefresher,
};
use tuihub_porter_core::infrastructure::{PorterSettings, SephirahClient};
use tuihub_porter_core::presentation::grpc::PorterGrpcService;

/// Assembles a [`Porter`] from its identity, capabilities and handler.
pub struct PorterBuilder {
    identity: PorterIdentity,
    descriptor: CapabilityDescriptor,
    handler: Arc<dyn Handler>,
    settings: PorterSettings,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl PorterBuilder {
    pub fn new(
        identity: PorterIdentity,
        descriptor: CapabilityDescriptor,
        handler: Arc<dyn Handler>,
    ) -> Self {
        Self {
            identity,
            descriptor,
            handler,
            settings: PorterSettings::default(),
            refresher: None,
        }
    }

    pub fn settings(mut self, settings: PorterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Exchange refresh tokens somewhere other than the configured Sephirah.
    pub fn token_refresher(mut self, refresher: Arc<dyn TokenRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Porter> {
        let sephirah = SephirahClient::connect_lazy(
            &self.settings.sephirah.endpoint,
            self.settings.sephirah.timeout,
        )?;
        let refresher: Arc<dyn TokenRefresher> = match self.refresher {
            Some(refresher) => refresher,
            None => Arc::new(sephirah.clone()),
        };

        let service = PorterService::new(
            self.identity,
            self.descriptor,
            self.handler,
            refresher,
            self.settings.porter_options(),
        );

        Ok(Porter {
            service: Arc::new(service),
            sephirah,
            settings: self.settings,
        })
    }
}

/// A running or runnable porter.
///
/// Cheap to clone; every clone shares the same enablement session.
#[derive(Clone)]
pub struct Porter {
    service: Arc<PorterService>,
    sephirah: SephirahClient,
    settings: PorterSettings,
}

impl Porter {
    pub fn settings(&self) -> &PorterSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.service.sessions().is_enabled()
    }

    /// Heartbeat timing Sephirah is expected to follow.
    pub fn heartbeat_policy(&self) -> &HeartbeatPolicy {
        self.service.heartbeat_policy()
    }

    /// Access token scoped to `user_id`, obtained with the porter's own token.
    pub async fn as_user(&self, user_id: i64) -> Result<String, PorterError> {
        let access_token = self
            .service
            .sessions()
            .access_token()
            .ok_or(PorterError::Unauthorized)?;

        self.sephirah
            .gain_user_privilege(&access_token, user_id)
            .await
            .map_err(PorterError::Upstream)
    }

    /// Serve on the configured address until the process is stopped.
    pub async fn serve(&self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    pub async fn serve_with_shutdown<F>(&self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.settings.server.address;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind porter gRPC server to {}", addr))?;
        self.serve_with_listener(listener, signal).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_with_listener<F>(&self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = listener.local_addr().context("Listener has no local address")?;
        let server = PorterGrpcService::new(self.service.clone()).into_server();

        info!(
            "Starting porter gRPC server '{}' on {}",
            self.service.information().identity.global_name,
            local_addr
        );

        tonic::transport::Server::builder()
            .timeout(self.settings.server.timeout)
            .add_service(server)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
            .await
            .context("Porter gRPC server failed")?;

        info!("Porter gRPC server stopped");
        Ok(())
    }
}
