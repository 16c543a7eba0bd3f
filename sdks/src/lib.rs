// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! TuiHub Porter SDK
//!
//! Build a porter by declaring what it serves and implementing [`Handler`];
//! the SDK runs the gRPC server, the enablement session and the authorization
//! gate in front of every call.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use tuihub_porter_sdk::*;
//! # async fn run(handler: Arc<dyn Handler>) -> anyhow::Result<()> {
//! let identity = PorterIdentity::new("steam-porter", "0.1.0", "steam")?;
//! let descriptor = CapabilityDescriptor::builder()
//!     .account_platform(FeatureFlag::new("steam", "Steam"), [RelationType::Owned])
//!     .build()?;
//!
//! PorterBuilder::new(identity, descriptor, handler)
//!     .settings(PorterSettings::from_env()?)
//!     .build()?
//!     .serve()
//!     .await
//! # }
//! ```

pub mod porter;

pub use porter::{Porter, PorterBuilder};

pub use tuihub_porter_core::domain::*;
pub use tuihub_porter_core::infrastructure::telemetry::init_logging;
pub use tuihub_porter_core::infrastructure::{PorterSettings, SephirahClient};
