pub mod context_guard;
pub mod error;
pub mod name;
pub mod service;
