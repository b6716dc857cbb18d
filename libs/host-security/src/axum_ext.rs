//! Axum glue: the right guard middleware and its rejection type.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{context::SecurityContext, right::Right};

/// Rejection produced by the host security layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Missing required right: {0}")]
    Forbidden(Right),
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.to_string(),
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().timestamp_millis(),
        });
        (status, Json(body)).into_response()
    }
}

/// Rejects the request unless its [`SecurityContext`] holds `right`.
///
/// Mount with `axum::middleware::from_fn_with_state(right, require_right)`.
///
/// # Errors
/// Returns [`AuthError::Unauthenticated`] when no context is attached and
/// [`AuthError::Forbidden`] when the context lacks the right.
pub async fn require_right(
    State(right): State<Right>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(ctx) = req.extensions().get::<SecurityContext>() else {
        tracing::warn!(%right, "No security context on request");
        return Err(AuthError::Unauthenticated);
    };

    if !ctx.has_right(&right) {
        tracing::warn!(subject = %ctx.subject(), %right, "Missing required right");
        return Err(AuthError::Forbidden(right));
    }

    Ok(next.run(req).await)
}
