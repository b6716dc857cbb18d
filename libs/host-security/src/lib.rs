#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Host security primitives shared by the server and its plugins.
//!
//! The host authenticates every request and attaches a [`SecurityContext`]
//! to it. Plugin routers are then wrapped with [`require_right`], which
//! rejects requests whose context lacks the right the plugin needs.

pub mod axum_ext;
pub mod context;
pub mod right;

pub use axum_ext::{AuthError, require_right};
pub use context::{SecurityContext, SecurityContextBuilder};
pub use right::Right;
