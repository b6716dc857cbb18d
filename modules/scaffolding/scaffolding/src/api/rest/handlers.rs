use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, rejection::PathRejection},
    http::HeaderMap,
};
use tracing::field::Empty;

use super::dto::IdentityInfoDto;
use super::error::ErrorPayload;
use crate::domain::error::DomainError;
use crate::domain::name::NameValidationError;
use crate::domain::service::IdentityLookupService;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn record_request_id(headers: &HeaderMap) {
    if let Some(rid) = headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        tracing::Span::current().record("request_id", rid);
    }
}

async fn lookup(
    svc: &Arc<IdentityLookupService>,
    name: String,
) -> Result<Json<IdentityInfoDto>, ErrorPayload> {
    let record = svc.spawn_get_info(name).await?;
    Ok(Json(IdentityInfoDto::from(record)))
}

/// Get identity info by name
#[utoipa::path(
    get,
    path = "/scaffolding/info/{name}",
    tag = "scaffolding",
    params(("name" = String, Path, description = "Identity name, 1-128 of [A-Za-z0-9._@-]")),
    responses(
        (status = 200, description = "Identity found", body = IdentityInfoDto),
        (status = 400, description = "Invalid identity name", body = ErrorPayload),
        (status = 401, description = "Not authenticated", body = ErrorPayload),
        (status = 403, description = "Missing ViewIdentity right", body = ErrorPayload),
        (status = 404, description = "Identity not found", body = ErrorPayload),
        (status = 500, description = "Lookup failed", body = ErrorPayload),
    )
)]
#[tracing::instrument(
    name = "scaffolding.get_identity_info",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn get_identity_info(
    Extension(svc): Extension<Arc<IdentityLookupService>>,
    headers: HeaderMap,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<IdentityInfoDto>, ErrorPayload> {
    record_request_id(&headers);

    let Path(name) = name.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Undecodable identity name in path");
        ErrorPayload::from(DomainError::from(NameValidationError::InvalidCharacters))
    })?;
    lookup(&svc, name).await
}

/// `GET /scaffolding/info` and `GET /scaffolding/info/`: no name given.
#[tracing::instrument(
    name = "scaffolding.get_identity_info",
    skip_all,
    fields(request_id = Empty)
)]
pub async fn get_identity_info_without_name(
    Extension(svc): Extension<Arc<IdentityLookupService>>,
    headers: HeaderMap,
) -> Result<Json<IdentityInfoDto>, ErrorPayload> {
    record_request_id(&headers);
    lookup(&svc, String::new()).await
}
