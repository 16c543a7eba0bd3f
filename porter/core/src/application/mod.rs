// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod authorization;
pub mod enablement;
pub mod porter_service;
pub mod session_store;

// Re-export services for convenience
pub use authorization::AuthorizationGate;
pub use enablement::{EnableOutcome, EnableRequest, EnablementService};
pub use porter_service::{PorterOptions, PorterService};
pub use session_store::SessionStore;
