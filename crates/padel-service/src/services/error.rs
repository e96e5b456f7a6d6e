//! Service layer error types

use padel_common::AppError;
use padel_core::DomainError;
use thiserror::Error;
use validator::ValidationErrors;

/// Error returned by every use case
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Match rule violation or store failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    /// A referenced record that has no dedicated domain error
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Input rejected by a rule the request type cannot express
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-level request validation failures
    #[error("Validation error: {0}")]
    InvalidRequest(#[from] ValidationErrors),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.http_status(),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::InvalidRequest(_) => 400,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) | Self::InvalidRequest(_) => "VALIDATION_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
