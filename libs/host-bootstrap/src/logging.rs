use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt};

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging section of the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `info,scaffolding=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// Optional log file; rotated daily, always written as JSON.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

/// Filter level for `-v` flags: 1 info, 2 debug, 3+ trace.
#[must_use]
pub fn level_for_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn level_rank(level: &str) -> Option<u8> {
    match level.to_ascii_lowercase().as_str() {
        "off" => Some(0),
        "error" => Some(1),
        "warn" => Some(2),
        "info" => Some(3),
        "debug" => Some(4),
        "trace" => Some(5),
        _ => None,
    }
}

/// Raise the default level of a filter directive string to `level`.
///
/// Target-specific directives are kept as they are. The default level is only
/// replaced when `level` is more verbose, so `-v` never quiets a configured
/// filter.
#[must_use]
pub fn raise_default_level(filter: &str, level: &str) -> String {
    let Some(wanted) = level_rank(level) else {
        return filter.to_owned();
    };

    let mut directives: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    match directives.iter().position(|d| level_rank(d).is_some()) {
        Some(idx) => {
            if level_rank(directives[idx]).is_some_and(|current| current < wanted) {
                directives[idx] = level;
            }
        }
        None => directives.insert(0, level),
    }
    directives.join(",")
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// stops the file writer.
///
/// # Errors
/// Returns an error for an invalid filter directive, an unusable log file
/// path, or when a global subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .with_context(|| format!("invalid log level '{}'", cfg.level))?,
    };

    let console = match cfg.format {
        LogFormat::Text => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    let (file_layer, guard) = match &cfg.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)
        .context("global tracing subscriber already installed")?;
    tracing_log::LogTracer::init().context("failed to bridge log records into tracing")?;

    Ok(guard)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), None);
        assert_eq!(level_for_verbosity(1), Some("info"));
        assert_eq!(level_for_verbosity(2), Some("debug"));
        assert_eq!(level_for_verbosity(7), Some("trace"));
    }

    #[test]
    fn raising_keeps_target_directives() {
        assert_eq!(
            raise_default_level("info,scaffolding=debug", "debug"),
            "debug,scaffolding=debug"
        );
        assert_eq!(raise_default_level("warn", "trace"), "trace");
        assert_eq!(raise_default_level("scaffolding=debug", "info"), "info,scaffolding=debug");
    }

    #[test]
    fn raising_never_lowers_verbosity() {
        assert_eq!(
            raise_default_level("info,scaffolding=debug", "info"),
            "info,scaffolding=debug"
        );
        assert_eq!(raise_default_level("trace", "debug"), "trace");
        assert_eq!(raise_default_level("DEBUG", "info"), "DEBUG");
    }

    #[test]
    fn config_defaults() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, LogFormat::Text);
        assert!(cfg.file.is_none());
    }

    #[test]
    fn format_is_lowercase_in_config() {
        let cfg: LoggingConfig =
            serde_saphyr::from_str("level: debug\nformat: json\nfile: logs/server.log\n").unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.file, Some(PathBuf::from("logs/server.log")));

        let bad: Result<LoggingConfig, _> = serde_saphyr::from_str("format: xml\n");
        assert!(bad.is_err());
    }
}
