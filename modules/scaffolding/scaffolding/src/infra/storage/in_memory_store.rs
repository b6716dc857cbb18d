//! Static identity store backed by configuration.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use scaffolding_sdk::{
    ContextHandle, IdentityRecord, IdentityStoreError, IdentityStorePluginClient,
};
use uuid::Uuid;

/// In-memory identity store.
///
/// Records are keyed by exact name. Contexts are tracked so that lookups and
/// releases on handles this store never issued, or already released, fail.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    records: HashMap<String, IdentityRecord>,
    open: Mutex<HashSet<Uuid>>,
}

impl InMemoryIdentityStore {
    /// Build a store from records. A later record replaces an earlier one
    /// with the same name.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = IdentityRecord>) -> Self {
        let mut by_name = HashMap::new();
        for record in records {
            if let Some(previous) = by_name.insert(record.name.clone(), record) {
                tracing::warn!(identity = %previous.name, "Duplicate identity replaced");
            }
        }
        Self {
            records: by_name,
            open: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of contexts acquired and not yet released.
    #[must_use]
    pub fn open_contexts(&self) -> usize {
        self.open.lock().len()
    }
}

impl IdentityStorePluginClient for InMemoryIdentityStore {
    fn acquire_context(&self) -> Option<ContextHandle> {
        let handle = ContextHandle::new();
        self.open.lock().insert(handle.id());
        Some(handle)
    }

    fn lookup_by_name(
        &self,
        ctx: &ContextHandle,
        name: &str,
    ) -> Result<Option<IdentityRecord>, IdentityStoreError> {
        if !self.open.lock().contains(&ctx.id()) {
            return Err(IdentityStoreError::InvalidContext);
        }
        Ok(self.records.get(name).cloned())
    }

    fn release_context(&self, ctx: ContextHandle) -> Result<(), IdentityStoreError> {
        if self.open.lock().remove(&ctx.id()) {
            Ok(())
        } else {
            Err(IdentityStoreError::InvalidContext)
        }
    }
}
