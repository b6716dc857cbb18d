use scaffolding_sdk::IdentityRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity info returned by `GET /scaffolding/info/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdentityInfoDto {
    /// Unique identity name
    pub name: String,
    /// Store identifier of the identity
    pub id: String,
    /// Primary email, `null` when the identity has none
    pub email: Option<String>,
}

impl From<IdentityRecord> for IdentityInfoDto {
    fn from(record: IdentityRecord) -> Self {
        Self {
            name: record.name,
            id: record.id,
            email: record.email,
        }
    }
}
