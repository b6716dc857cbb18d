//! Layered configuration loading.
//!
//! Layers, lowest precedence first:
//! 1. `T::default()`
//! 2. YAML file, when a path is given
//! 3. environment variables prefixed with [`ENV_PREFIX`], nested with `__`
//!
//! CLI overrides are applied by the caller on the returned value.

use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Serialize, de::DeserializeOwned};

/// `APP__SERVER__BIND_ADDR=0.0.0.0:9000` sets `server.bind_addr`.
pub const ENV_PREFIX: &str = "APP__";

/// Load `T` from defaults, an optional YAML file and the environment.
///
/// # Errors
/// Returns an error if the file is missing or any layer fails to
/// deserialize into `T`.
pub fn load_layered<T>(path: Option<&Path>) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()));

    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("invalid configuration")
}

/// Render a configuration value as YAML.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_saphyr::to_string(value).context("failed to render configuration as YAML")
}
