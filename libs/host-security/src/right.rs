use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the right required to read identity information.
pub const VIEW_IDENTITY: &str = "ViewIdentity";

/// A named capability granted to a subject.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Right(Cow<'static, str>);

impl Right {
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The right to read identity records.
    #[must_use]
    pub const fn view_identity() -> Self {
        Self::from_static(VIEW_IDENTITY)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Right {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
