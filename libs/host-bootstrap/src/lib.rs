//! Host bootstrap helpers shared by server binaries.

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{ENV_PREFIX, load_layered, to_yaml};
pub use logging::{
    LogFormat, LoggingConfig, init_logging, level_for_verbosity, raise_default_level,
};
pub use signals::{shutdown_signal, wait_for_shutdown};
