use async_trait::async_trait;

use crate::errors::ScaffoldingError;
use crate::models::IdentityRecord;

/// Object-safe client for reading identity information (Version 1).
///
/// Implemented in-process by the scaffolding module and remotely by
/// `ScaffoldingHttpClient`. Consumers hold it as `Arc<dyn ScaffoldingClientV1>`.
#[async_trait]
pub trait ScaffoldingClientV1: Send + Sync {
    /// Look up a single identity by its unique name.
    ///
    /// The name is trimmed before use.
    ///
    /// # Errors
    /// [`ScaffoldingError::InvalidInput`] for a rejected name,
    /// [`ScaffoldingError::NotFound`] for an unknown one, and the remaining
    /// variants for authorization, server and transport failures.
    async fn get_info(&self, name: &str) -> Result<IdentityRecord, ScaffoldingError>;
}
