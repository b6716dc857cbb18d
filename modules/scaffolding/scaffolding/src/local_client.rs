//! Local implementation of `ScaffoldingClientV1`.
//!
//! Used for in-process consumers. Delegates to the domain service and
//! converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use scaffolding_sdk::{IdentityRecord, ScaffoldingClientV1, ScaffoldingError};

use crate::domain::service::IdentityLookupService;

pub struct ScaffoldingLocalClient {
    service: Arc<IdentityLookupService>,
}

impl ScaffoldingLocalClient {
    #[must_use]
    pub fn new(service: Arc<IdentityLookupService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ScaffoldingClientV1 for ScaffoldingLocalClient {
    async fn get_info(&self, name: &str) -> Result<IdentityRecord, ScaffoldingError> {
        self.service
            .spawn_get_info(name.to_owned())
            .await
            .map_err(Into::into)
    }
}
