//! Engine-specific error types

use thiserror::Error;
use shared::{EntityKind, SharedError};

use crate::core::placement::PlacementRejection;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u32 },

    #[error("Placement rejected: {0}")]
    ValidationRejected(#[from] PlacementRejection),

    #[error("Store gateway failed during {operation}: {message}")]
    GatewayFailure { operation: &'static str, message: String },

    #[error("Malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    #[error("No ids left for new {kind} records")]
    IdSpaceExhausted { kind: EntityKind },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),
}

impl EngineError {
    pub fn not_found(kind: EntityKind, id: impl Into<u32>) -> Self {
        EngineError::NotFound { kind, id: id.into() }
    }

    pub fn gateway(operation: &'static str, error: impl std::fmt::Display) -> Self {
        EngineError::GatewayFailure {
            operation,
            message: error.to_string(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        EngineError::MalformedSnapshot { reason: reason.into() }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
