//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A uniqueness constraint rejected a write
    #[error("Conflict: {resource}")]
    Conflict { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    /// A collaborator (datastore, SMS provider) failed
    #[error("Dependency failure: {message}")]
    Dependency { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for a datastore or provider failure
    pub fn dependency(message: impl Into<String>) -> Self {
        DomainError::Dependency {
            message: message.into(),
        }
    }

    /// Whether this error came from a failing collaborator rather than the caller
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Dependency { .. }
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::TokenGenerationFailed)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
