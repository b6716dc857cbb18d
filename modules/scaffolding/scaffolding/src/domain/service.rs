use std::sync::Arc;

use scaffolding_sdk::{IdentityRecord, IdentityStorePluginClient};
use tracing::{debug, error, info, warn};

use super::context_guard::ContextGuard;
use super::error::DomainError;
use super::name::{IdentityName, NameValidationError, sanitize_for_log};

/// Looks up one identity record per call.
///
/// Holds no per-request state; each call acquires its own store context and
/// releases it before returning.
pub struct IdentityLookupService {
    store: Arc<dyn IdentityStorePluginClient>,
}

impl IdentityLookupService {
    #[must_use]
    pub fn new(store: Arc<dyn IdentityStorePluginClient>) -> Self {
        Self { store }
    }

    /// Validate `raw_name` and fetch its record from the store.
    ///
    /// Blocks on the store. Async callers go through [`Self::spawn_get_info`].
    ///
    /// # Errors
    /// See [`DomainError`].
    pub fn get_info(&self, raw_name: &str) -> Result<IdentityRecord, DomainError> {
        let name = IdentityName::parse(raw_name).inspect_err(|e| match e {
            NameValidationError::TooLong { .. } => {
                warn!(len = raw_name.chars().count(), reason = %e, "Rejected identity name");
            }
            NameValidationError::Empty | NameValidationError::InvalidCharacters => {
                warn!(
                    identity = %sanitize_for_log(raw_name),
                    reason = %e,
                    "Rejected identity name"
                );
            }
        })?;
        debug!(identity = %sanitize_for_log(name.as_str()), "Fetching identity info");

        let Some(ctx) = ContextGuard::acquire(self.store.as_ref()) else {
            error!("Identity store returned no context");
            return Err(DomainError::ContextUnavailable);
        };

        match ctx.lookup_by_name(name.as_str()) {
            Ok(Some(record)) => {
                debug!(identity = %sanitize_for_log(&record.name), "Retrieved identity info");
                Ok(record)
            }
            Ok(None) => {
                info!(identity = %sanitize_for_log(name.as_str()), "Identity not found");
                Err(DomainError::NotFound)
            }
            Err(e) => {
                error!(
                    identity = %sanitize_for_log(name.as_str()),
                    error = %e,
                    "Identity store lookup failed"
                );
                Err(DomainError::Store(e))
            }
        }
    }

    /// Run [`Self::get_info`] on the blocking pool.
    ///
    /// A panic inside the lookup surfaces as [`DomainError::Unexpected`].
    ///
    /// # Errors
    /// See [`DomainError`].
    pub async fn spawn_get_info(
        self: &Arc<Self>,
        raw_name: String,
    ) -> Result<IdentityRecord, DomainError> {
        let svc = Arc::clone(self);
        tokio::task::spawn_blocking(move || svc.get_info(&raw_name))
            .await
            .map_err(|e| {
                error!(error = %e, "Identity lookup task failed");
                DomainError::unexpected(format!("Task join error: {e}"))
            })?
    }
}
