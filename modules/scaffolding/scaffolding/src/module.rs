use std::sync::Arc;

use axum::Router;
use scaffolding_sdk::{IdentityStorePluginClient, ScaffoldingClientV1};
use tracing::info;

use crate::api::rest::routes;
use crate::config::ScaffoldingConfig;
use crate::domain::service::IdentityLookupService;
use crate::infra::storage::InMemoryIdentityStore;
use crate::local_client::ScaffoldingLocalClient;

/// Composition root of the scaffolding module.
///
/// Wires a store into the lookup service and hands out the REST router and
/// the in-process client.
#[derive(Clone)]
pub struct ScaffoldingModule {
    service: Arc<IdentityLookupService>,
}

impl ScaffoldingModule {
    /// Wire the module against a host-provided store.
    #[must_use]
    pub fn new(store: Arc<dyn IdentityStorePluginClient>) -> Self {
        Self {
            service: Arc::new(IdentityLookupService::new(store)),
        }
    }

    /// Wire the module against the in-memory store seeded from `cfg`.
    ///
    /// # Errors
    /// Returns an error if the configured identities are invalid.
    pub fn from_config(cfg: ScaffoldingConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        let store = InMemoryIdentityStore::new(cfg.identities.into_iter().map(Into::into));
        info!(identities = store.len(), "Initialized in-memory identity store");
        Ok(Self::new(Arc::new(store)))
    }

    #[must_use]
    pub fn service(&self) -> Arc<IdentityLookupService> {
        Arc::clone(&self.service)
    }

    /// In-process client for other components.
    #[must_use]
    pub fn client(&self) -> Arc<dyn ScaffoldingClientV1> {
        Arc::new(ScaffoldingLocalClient::new(self.service()))
    }

    /// REST routes of the module, guarded by the `ViewIdentity` right.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.service())
    }
}
