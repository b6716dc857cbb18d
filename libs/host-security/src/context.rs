use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::right::Right;

/// Subject used when authentication is disabled.
pub const ROOT_SUBJECT: &str = "root";

/// Request-scoped identity of the caller and the rights it holds.
///
/// Built by the host authentication layer and stored in request extensions.
/// Plugins read it; they never construct one themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContext {
    subject: String,
    rights: BTreeSet<Right>,
    #[serde(default)]
    root: bool,
}

impl SecurityContext {
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Context that passes every right check. Used when auth is disabled.
    #[must_use]
    pub fn root() -> Self {
        Self {
            subject: ROOT_SUBJECT.to_owned(),
            rights: BTreeSet::new(),
            root: true,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn rights(&self) -> &BTreeSet<Right> {
        &self.rights
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root
    }

    #[must_use]
    pub fn has_right(&self, right: &Right) -> bool {
        self.root || self.rights.contains(right)
    }
}

#[derive(Debug, Default)]
pub struct SecurityContextBuilder {
    subject: String,
    rights: BTreeSet<Right>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    #[must_use]
    pub fn right(mut self, right: Right) -> Self {
        self.rights.insert(right);
        self
    }

    #[must_use]
    pub fn rights<I>(mut self, rights: I) -> Self
    where
        I: IntoIterator<Item = Right>,
    {
        self.rights.extend(rights);
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject: self.subject,
            rights: self.rights,
            root: false,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_rights() {
        let ctx = SecurityContext::builder()
            .subject("alice")
            .right(Right::view_identity())
            .rights([Right::new("Audit"), Right::new("Audit")])
            .build();

        assert_eq!(ctx.subject(), "alice");
        assert_eq!(ctx.rights().len(), 2);
        assert!(ctx.has_right(&Right::view_identity()));
        assert!(!ctx.has_right(&Right::new("Admin")));
        assert!(!ctx.is_root());
    }

    #[test]
    fn empty_builder_grants_nothing() {
        let ctx = SecurityContext::builder().build();
        assert_eq!(ctx.subject(), "");
        assert!(!ctx.has_right(&Right::view_identity()));
    }

    #[test]
    fn root_context_passes_every_check() {
        let ctx = SecurityContext::root();
        assert_eq!(ctx.subject(), ROOT_SUBJECT);
        assert!(ctx.is_root());
        assert!(ctx.has_right(&Right::view_identity()));
        assert!(ctx.has_right(&Right::new("anything")));
    }
}
