// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Domain model of a porter: what it can serve, who owns it, and how requests
//! and failures are shaped.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements mod

pub mod capability;
pub mod error;
pub mod handler;
pub mod request;
pub mod session;
pub mod token;

pub use capability::{
    AccountPlatform, CapabilityDescriptor, CapabilityDescriptorBuilder, DescriptorError,
    FeatureFlag, IdentityError, PorterIdentity, PorterInformation,
};
pub use error::{CapabilityCategory, PorterError};
pub use handler::Handler;
pub use request::*;
pub use session::{EnableDecision, HeartbeatPolicy, OwnerId, Session, TokenPair};
pub use token::TokenRefresher;
