//! Scaffolding Module
//!
//! Serves identity information from a host identity store over
//! `GET /scaffolding/info/{name}`.
//!
//! ## Public API
//!
//! The public API is defined in the `scaffolding-sdk` crate and re-exported here:
//! - `ScaffoldingClientV1` - trait for in-process and remote consumers
//! - `IdentityStorePluginClient` - the store contract the host provides
//! - `IdentityRecord`, `ScaffoldingError` - shared types
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use scaffolding_sdk::{
    ContextHandle, IdentityRecord, IdentityStoreError, IdentityStorePluginClient,
    ScaffoldingClientV1, ScaffoldingError,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::ScaffoldingModule;

// === CONFIGURATION ===
pub mod config;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for tests and host wiring; consumers should use the SDK types.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;
