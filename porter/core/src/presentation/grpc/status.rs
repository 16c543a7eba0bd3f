// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use tonic::metadata::MetadataValue;
use tonic::Status;

use crate::domain::error::PorterError;

/// Metadata key naming the descriptor set an `Unsupported` rejection refers to.
pub const UNSUPPORTED_CATEGORY_KEY: &str = "x-porter-unsupported-category";

impl From<PorterError> for Status {
    fn from(err: PorterError) -> Self {
        match err {
            PorterError::Unauthorized => Status::permission_denied(err.to_string()),
            PorterError::InvalidArgument(message) => Status::invalid_argument(message),
            PorterError::Unsupported { category, .. } => {
                let mut status = Status::invalid_argument(err.to_string());
                status.metadata_mut().insert(
                    UNSUPPORTED_CATEGORY_KEY,
                    MetadataValue::from_static(category.as_str()),
                );
                status
            }
            PorterError::Conflict { .. } => Status::failed_precondition(err.to_string()),
            PorterError::Upstream(source) => upstream_status(source).unwrap_or_else(|source| {
                Status::unavailable(format!("Token exchange failed: {}", source))
            }),
            PorterError::NotImplemented(_) => Status::unimplemented(err.to_string()),
            PorterError::Handler(source) => {
                upstream_status(source)
                .unwrap_or_else(|source| Status::internal(source.to_string()))
            }
        }
    }
}

/// Unwrap a gRPC status carried inside `err`, keeping its details and metadata.
/// Any other error is handed back unchanged.
fn upstream_status(err: anyhow::Error) -> Result<Status, anyhow::Error> {
    err.downcast::<Status>()
}
