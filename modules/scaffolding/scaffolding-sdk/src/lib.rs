//! Public contract of the scaffolding module.
//!
//! - [`ScaffoldingClientV1`]: what consumers call to read identity info
//! - [`IdentityStorePluginClient`]: what a host store must provide
//! - [`IdentityRecord`] and [`ScaffoldingError`]: shared types
//!
//! The optional `http-client` feature adds [`ScaffoldingHttpClient`], a
//! remote implementation of the client trait.

pub mod api;
pub mod errors;
pub mod models;
pub mod plugin_api;

#[cfg(feature = "http-client")]
pub mod http_client;

pub use api::ScaffoldingClientV1;
pub use errors::ScaffoldingError;
pub use models::IdentityRecord;
pub use plugin_api::{ContextHandle, IdentityStoreError, IdentityStorePluginClient};

#[cfg(feature = "http-client")]
pub use http_client::ScaffoldingHttpClient;
