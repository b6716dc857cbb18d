use utoipa::OpenApi;

use super::dto::IdentityInfoDto;
use super::error::ErrorPayload;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Scaffolding", description = "Identity info lookup"),
    paths(handlers::get_identity_info),
    components(schemas(IdentityInfoDto, ErrorPayload)),
    tags((name = "scaffolding", description = "Identity information"))
)]
pub struct ScaffoldingApiDoc;

/// OpenAPI document for the module's routes.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ScaffoldingApiDoc::openapi()
}
