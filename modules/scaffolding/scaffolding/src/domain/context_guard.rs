use scaffolding_sdk::{
    ContextHandle, IdentityRecord, IdentityStoreError, IdentityStorePluginClient,
};

/// Owns a store context for the duration of one lookup.
///
/// The context is released when the guard drops, on every exit path
/// including unwinding. A failed release is logged and otherwise ignored.
pub struct ContextGuard<'a> {
    store: &'a dyn IdentityStorePluginClient,
    handle: Option<ContextHandle>,
}

impl<'a> ContextGuard<'a> {
    /// Acquire a context, or `None` when the store has none to give.
    #[must_use]
    pub fn acquire(store: &'a dyn IdentityStorePluginClient) -> Option<Self> {
        let handle = store.acquire_context()?;
        tracing::trace!(context_id = %handle.id(), "Acquired identity store context");
        Some(Self {
            store,
            handle: Some(handle),
        })
    }

    /// Look up `name` within the held context.
    ///
    /// # Errors
    /// Whatever the store reports.
    pub fn lookup_by_name(
        &self,
        name: &str,
    ) -> Result<Option<IdentityRecord>, IdentityStoreError> {
        let handle = self
            .handle
            .as_ref()
            .ok_or(IdentityStoreError::InvalidContext)?;
        self.store.lookup_by_name(handle, name)
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let context_id = handle.id();
        match self.store.release_context(handle) {
            Ok(()) => tracing::trace!(%context_id, "Released identity store context"),
            Err(e) => tracing::error!(
                %context_id,
                error = %e,
                "Failed to release identity store context"
            ),
        }
    }
}
