//! Scaffolding server host: configuration, authentication and HTTP wiring
//! around the scaffolding module.

pub mod auth;
pub mod config;
pub mod cors;
pub mod server;

pub use config::AppConfig;
pub use server::build_router;
