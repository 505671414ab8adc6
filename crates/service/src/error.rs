//! Caller-facing error surface.
//!
//! Every failure leaving the service layer is one of these categories, with
//! a numeric code and a message; the transport collaborator only has to
//! serialize the shape. All categories are terminal: nothing here is
//! retryable from the core's point of view.

use serde::Serialize;
use thiserror::Error;

use carebase_auth::AuthError;
use carebase_core::DomainError;
use carebase_store::StoreError;

use crate::credentials::CredentialError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Unauthenticated,
    TokenExpired,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    /// Infrastructure fallback (store unreachable, hashing failure).
    Unavailable,
}

impl ErrorCategory {
    /// Numeric code of the category. 498 for expired tokens is deliberate:
    /// clients distinguish "re-authenticate" from a generic 401.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCategory::Unauthenticated => 401,
            ErrorCategory::TokenExpired => 498,
            ErrorCategory::Forbidden => 403,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Conflict => 409,
            ErrorCategory::Validation => 422,
            ErrorCategory::Unavailable => 502,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub category: ErrorCategory,
    pub code: u16,
    pub message: String,
}

impl ApiError {
    fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            code: category.status_code(),
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unauthenticated, message)
    }

    pub fn token_expired() -> Self {
        Self::new(
            ErrorCategory::TokenExpired,
            "the authentication token has expired",
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Conflict, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unavailable, message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => {
                ApiError::unauthenticated("could not validate credentials")
            }
            AuthError::TokenExpired => ApiError::token_expired(),
            AuthError::Forbidden(code) => {
                ApiError::forbidden(format!("missing permission '{code}'"))
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => ApiError::conflict(message),
            StoreError::NotFound => ApiError::not_found("not found"),
            StoreError::Unavailable(message) => ApiError::unavailable(message),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => ApiError::validation(message),
            DomainError::InvalidId(message) => ApiError::validation(message),
            DomainError::NotFound => ApiError::not_found("not found"),
            DomainError::Conflict(message) => ApiError::conflict(message),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        ApiError::unavailable(err.to_string())
    }
}
