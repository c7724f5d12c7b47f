//! Configuration for the practice API.
//!
//! Loads `config.yaml` (or the file named by `PRACTICE_CONFIG`), interpolates
//! environment variables and validates the result. A missing file yields the
//! defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use practice_api::config::load_config;
//!
//! let config = load_config(None)?;
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod assistant;
mod downloads;
mod observability;
mod server;
mod transcription;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use assistant::{AssistantConfig, AssistantProvider};
pub use downloads::{DownloadsConfig, Platform};
pub use observability::{LoggingConfig, MetricsExporterConfig, ObservabilityConfig, OtelConfig};
pub use server::ServerConfig;
pub use transcription::{TranscriptionConfig, TranscriptionProvider};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PRACTICE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
    /// Assistant model.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Speech-to-text backend.
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Installer downloads.
    #[serde(default)]
    pub downloads: DownloadsConfig,
    /// Logging, tracing and metrics.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration with environment variable interpolation.
///
/// The path is `path`, else `$PRACTICE_CONFIG`, else `config.yaml`. When no
/// path was given explicitly and the file does not exist, defaults are used.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let from_env = std::env::var(CONFIG_PATH_ENV).ok();
    let explicit = path.or(from_env.as_deref());
    let path = explicit.unwrap_or(DEFAULT_CONFIG_PATH);

    if explicit.is_none() && !Path::new(path).exists() {
        tracing::debug!(path, "No config file, using defaults");
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. An unset or empty
/// variable without a default becomes the empty string.
#[allow(clippy::expect_used)] // Regex is a constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match std::env::var(&caps[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.assistant.history_limit == 0 {
        return Err(ConfigError::ValidationError(
            "assistant.history_limit must be at least 1".to_string(),
        ));
    }

    if config.assistant.timeout_secs == 0 || config.transcription.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "assistant.timeout_secs and transcription.timeout_secs must be positive".to_string(),
        ));
    }

    if config.assistant.provider == AssistantProvider::Ollama
        && !is_http_url(&config.assistant.base_url)
    {
        return Err(ConfigError::ValidationError(
            "assistant.base_url must be an http(s) URL".to_string(),
        ));
    }

    if config.transcription.provider == TranscriptionProvider::Whisper
        && !is_http_url(&config.transcription.endpoint)
    {
        return Err(ConfigError::ValidationError(
            "transcription.endpoint must be an http(s) URL".to_string(),
        ));
    }

    if let Some(addr) = &config.observability.metrics.listen_address
        && addr.parse::<std::net::SocketAddr>().is_err()
    {
        return Err(ConfigError::ValidationError(format!(
            "observability.metrics.listen_address is not a socket address: {addr}"
        )));
    }

    Ok(())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
