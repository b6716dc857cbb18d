use serde::{Deserialize, Serialize};

/// A single identity as returned by the lookup.
///
/// `email` is optional and serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub name: String,
    pub id: String,
    pub email: Option<String>,
}
