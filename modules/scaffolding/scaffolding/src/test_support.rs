#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use scaffolding_sdk::{
    ContextHandle, IdentityRecord, IdentityStoreError, IdentityStorePluginClient,
};

#[must_use]
pub fn record(name: &str) -> IdentityRecord {
    IdentityRecord {
        name: name.to_owned(),
        id: format!("id-{name}"),
        email: Some(format!("{name}@example.com")),
    }
}

/// Store double that counts every call and can be told to misbehave.
#[derive(Default)]
pub struct CountingStore {
    records: HashMap<String, IdentityRecord>,
    no_contexts: bool,
    lookup_failure: Option<IdentityStoreError>,
    release_failure: Option<IdentityStoreError>,
    panic_on_lookup: bool,
    acquired: AtomicUsize,
    released: AtomicUsize,
    lookups: Mutex<Vec<String>>,
}

impl CountingStore {
    #[must_use]
    pub fn with_identities<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            records: names
                .into_iter()
                .map(|n| (n.to_owned(), record(n)))
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = IdentityRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.name.clone(), r)).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_contexts(mut self) -> Self {
        self.no_contexts = true;
        self
    }

    #[must_use]
    pub fn failing_lookup(mut self, err: IdentityStoreError) -> Self {
        self.lookup_failure = Some(err);
        self
    }

    #[must_use]
    pub fn failing_release(mut self, err: IdentityStoreError) -> Self {
        self.release_failure = Some(err);
        self
    }

    #[must_use]
    pub fn panicking_lookup(mut self) -> Self {
        self.panic_on_lookup = true;
        self
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl IdentityStorePluginClient for CountingStore {
    fn acquire_context(&self) -> Option<ContextHandle> {
        if self.no_contexts {
            return None;
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Some(ContextHandle::new())
    }

    fn lookup_by_name(
        &self,
        _ctx: &ContextHandle,
        name: &str,
    ) -> Result<Option<IdentityRecord>, IdentityStoreError> {
        self.lookups.lock().push(name.to_owned());
        assert!(!self.panic_on_lookup, "store exploded while looking up {name}");
        if let Some(err) = &self.lookup_failure {
            return Err(err.clone());
        }
        Ok(self.records.get(name).cloned())
    }

    fn release_context(&self, _ctx: ContextHandle) -> Result<(), IdentityStoreError> {
        self.released.fetch_add(1, Ordering::SeqCst);
        match &self.release_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
