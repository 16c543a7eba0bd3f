// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`tuihub-porter-core`)
//!
//! gRPC surface that translates Sephirah's calls into application service
//! calls. **No business logic lives here**: session and gate decisions are
//! made in `crate::application`.
//!
//! | Module | Transport | Description |
//! |--------|-----------|-------------|
//! | [`grpc`] | gRPC (Tonic) | `LibrarianPorterService` implementation and status mapping |

pub mod grpc;
