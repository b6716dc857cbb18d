use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::DomainError;

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorPayload {
    /// HTTP reason phrase, e.g. `Bad Request`
    pub error: String,
    /// Human-readable message, safe to show to clients
    pub message: String,
    /// HTTP status code
    pub status: u16,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ErrorPayload {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            message: message.into(),
            status: status.as_u16(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Map a domain error to its HTTP status.
#[must_use]
pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::InvalidName(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::ContextUnavailable | DomainError::Store(_) | DomainError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DomainError> for ErrorPayload {
    fn from(e: DomainError) -> Self {
        Self::new(status_for(&e), e.public_message())
    }
}

impl IntoResponse for ErrorPayload {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::name::NameValidationError;
    use scaffolding_sdk::IdentityStoreError;

    #[test]
    fn domain_errors_map_to_status_and_message() {
        let cases = [
            (
                DomainError::from(NameValidationError::InvalidCharacters),
                400,
                "Bad Request",
                "Identity name contains invalid characters",
            ),
            (DomainError::NotFound, 404, "Not Found", "Identity not found"),
            (
                DomainError::ContextUnavailable,
                500,
                "Internal Server Error",
                "Internal server error",
            ),
            (
                DomainError::from(IdentityStoreError::backend("secret detail")),
                500,
                "Internal Server Error",
                "An error occurred while retrieving identity information",
            ),
            (
                DomainError::unexpected("Task join error: boom"),
                500,
                "Internal Server Error",
                "An unexpected error occurred",
            ),
        ];

        for (err, status, reason, message) in cases {
            let payload = ErrorPayload::from(err);
            assert_eq!(payload.status, status);
            assert_eq!(payload.error, reason);
            assert_eq!(payload.message, message);
            assert!(payload.timestamp > 0);
        }
    }

    #[test]
    fn serializes_exactly_four_fields() {
        let payload = ErrorPayload::new(StatusCode::NOT_FOUND, "Identity not found");
        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["error", "message", "status", "timestamp"]);
    }
}
