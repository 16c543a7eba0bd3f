// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lib
//!
//! Core of the TuiHub porter SDK: the enablement session, the authorization
//! gate in front of every domain operation, and the gRPC surface that exposes
//! them to Sephirah.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Implements lib

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
