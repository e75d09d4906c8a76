//! Service layer error type
//!
//! Domain and application errors pass through unchanged so the HTTP layer can
//! report their own codes. The remaining variants cover rules that live only
//! in services.

use academy_common::{domain_status, AppError};
use academy_core::DomainError;
use thiserror::Error;

use crate::payments::PaymentError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied(reason.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::PermissionDenied(_) => 403,
            Self::Validation(_) => 400,
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<PaymentError> for ServiceError {
    fn from(err: PaymentError) -> Self {
        Self::App(err.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
