use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use host_bootstrap::LoggingConfig;
use host_security::Right;
use scaffolding::config::ScaffoldingConfig;
use serde::{Deserialize, Serialize};

/// Effective server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub scaffolding: ScaffoldingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Per-request timeout enforced by the host.
    pub request_timeout_ms: u64,
    pub cors_enabled: bool,
    /// `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8087)),
            request_timeout_ms: 30_000,
            cors_enabled: false,
            cors_allowed_origins: vec!["*".to_owned()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AuthConfig {
    /// Treat every request as coming from an all-powerful root subject.
    pub auth_disabled: bool,
    /// Static bearer tokens and the subject and rights each one grants.
    pub tokens: Vec<TokenGrant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenGrant {
    pub token: String,
    pub subject: String,
    #[serde(default)]
    pub rights: Vec<Right>,
}

impl AppConfig {
    /// Defaults, then the YAML file, then `APP__*` environment variables.
    ///
    /// # Errors
    /// Returns an error if any layer cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        host_bootstrap::load_layered(path)
    }

    /// Apply `--port` and `-v` on top of the loaded layers.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.bind_addr.set_port(port);
        }
        if let Some(level) = host_bootstrap::level_for_verbosity(verbose) {
            self.logging.level = host_bootstrap::raise_default_level(&self.logging.level, level);
        }
    }

    /// # Errors
    /// Describes the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.server.request_timeout_ms == 0 {
            anyhow::bail!("server.request_timeout_ms must be greater than zero");
        }

        let mut seen = HashSet::new();
        for (idx, grant) in self.auth.tokens.iter().enumerate() {
            if grant.token.trim().is_empty() {
                anyhow::bail!("auth.tokens[{idx}]: token must not be empty");
            }
            if grant.subject.trim().is_empty() {
                anyhow::bail!("auth.tokens[{idx}]: subject must not be empty");
            }
            if !seen.insert(grant.token.as_str()) {
                anyhow::bail!("auth.tokens[{idx}]: duplicate token");
            }
        }
        if !self.auth.auth_disabled && self.auth.tokens.is_empty() {
            tracing::warn!("Authentication is enabled but no tokens are configured");
        }

        self.scaffolding.validate()
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        host_bootstrap::to_yaml(self)
    }
}
