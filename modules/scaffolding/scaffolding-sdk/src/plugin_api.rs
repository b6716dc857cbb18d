//! Contract between the scaffolding module and the host's identity store.
//!
//! The calls are synchronous: the host store is a blocking API and the
//! module runs every lookup on a blocking task. Keeping it synchronous also
//! lets the module release contexts from `Drop`.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::models::IdentityRecord;

/// Opaque, request-scoped handle to a store data context.
///
/// Not `Clone`: exactly one owner, consumed by
/// [`IdentityStorePluginClient::release_context`].
#[derive(PartialEq, Eq, Hash)]
pub struct ContextHandle(Uuid);

impl ContextHandle {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for ContextHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContextHandle").field(&self.0).finish()
    }
}

/// Failures reported by a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityStoreError {
    #[error("identity store backend failure: {0}")]
    Backend(String),

    #[error("context handle is not open")]
    InvalidContext,
}

impl IdentityStoreError {
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Identity store provided by the host.
pub trait IdentityStorePluginClient: Send + Sync {
    /// Open a data context for one request, or `None` if none is available.
    fn acquire_context(&self) -> Option<ContextHandle>;

    /// Find the record with exactly this name.
    ///
    /// # Errors
    /// Backend failures and unknown handles.
    fn lookup_by_name(
        &self,
        ctx: &ContextHandle,
        name: &str,
    ) -> Result<Option<IdentityRecord>, IdentityStoreError>;

    /// Close a context previously returned by [`Self::acquire_context`].
    ///
    /// # Errors
    /// Backend failures and unknown handles.
    fn release_context(&self, ctx: ContextHandle) -> Result<(), IdentityStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let a = ContextHandle::new();
        let b = ContextHandle::new();
        assert_ne!(a, b);
        assert_eq!(ContextHandle::from_uuid(a.id()), a);
    }
}
