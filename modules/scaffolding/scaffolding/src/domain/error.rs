use scaffolding_sdk::{IdentityStoreError, ScaffoldingError};
use thiserror::Error;

use super::name::NameValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Identity not found";
pub const CONTEXT_UNAVAILABLE_MESSAGE: &str = "Internal server error";
pub const STORE_FAILURE_MESSAGE: &str = "An error occurred while retrieving identity information";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Failures of an identity lookup.
///
/// `Display` carries full detail for logs. Callers outside the process only
/// ever see [`DomainError::public_message`].
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    InvalidName(#[from] NameValidationError),

    #[error("identity not found")]
    NotFound,

    #[error("identity store context unavailable")]
    ContextUnavailable,

    #[error("identity store failure: {0}")]
    Store(#[from] IdentityStoreError),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl DomainError {
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::ContextUnavailable | Self::Store(_) | Self::Unexpected(_)
        )
    }

    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidName(e) => e.to_string(),
            Self::NotFound => NOT_FOUND_MESSAGE.to_owned(),
            Self::ContextUnavailable => CONTEXT_UNAVAILABLE_MESSAGE.to_owned(),
            Self::Store(_) => STORE_FAILURE_MESSAGE.to_owned(),
            Self::Unexpected(_) => UNEXPECTED_MESSAGE.to_owned(),
        }
    }
}

impl From<DomainError> for ScaffoldingError {
    fn from(e: DomainError) -> Self {
        let message = e.public_message();
        match e {
            DomainError::InvalidName(_) => ScaffoldingError::InvalidInput(message),
            DomainError::NotFound => ScaffoldingError::NotFound(message),
            DomainError::ContextUnavailable
            | DomainError::Store(_)
            | DomainError::Unexpected(_) => ScaffoldingError::Internal(message),
        }
    }
}
