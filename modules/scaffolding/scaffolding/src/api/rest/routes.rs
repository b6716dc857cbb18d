//! REST route registration for the scaffolding module.

use std::sync::Arc;

use axum::{Extension, Json, Router, http::StatusCode, middleware, routing::get};
use host_security::{Right, require_right};

use super::error::ErrorPayload;
use super::{handlers, openapi};
use crate::domain::service::IdentityLookupService;

pub const INFO_PATH: &str = "/scaffolding/info";
pub const OPENAPI_PATH: &str = "/scaffolding/openapi.json";

/// Build the module router.
///
/// Lookup routes require [`Right::view_identity`]; the host must attach a
/// `SecurityContext` before requests reach this router. The OpenAPI document
/// is public.
#[must_use]
pub fn router(service: Arc<IdentityLookupService>) -> Router {
    Router::new()
        .route(
            &format!("{INFO_PATH}/{{name}}"),
            get(handlers::get_identity_info),
        )
        .route(INFO_PATH, get(handlers::get_identity_info_without_name))
        .route(
            &format!("{INFO_PATH}/"),
            get(handlers::get_identity_info_without_name),
        )
        .route_layer(middleware::from_fn_with_state(
            Right::view_identity(),
            require_right,
        ))
        .route(OPENAPI_PATH, get(|| async { Json(openapi::openapi()) }))
        .method_not_allowed_fallback(|| async {
            ErrorPayload::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
        })
        .layer(Extension(service))
}
