//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honoured (loaded by `main.rs`).
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base of generated short links (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Lifetime of shortcodes created without a validity (default: 30)
//! - `AUDIT_ENABLED` - Emit audit events (default: `true`)
//! - `AUDIT_QUEUE_CAPACITY` - Audit event buffer size (default: 1000, min: 10)
//! - `BEHIND_PROXY` - Take the click origin from `X-Forwarded-For` / `X-Real-IP` (default: `false`)

use anyhow::Result;
use std::env;

use crate::application::services::link_service::DEFAULT_VALIDITY_MINUTES;

/// One year, the longest default validity accepted.
const MAX_DEFAULT_VALIDITY_MINUTES: i64 = 525_600;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: i64,
    pub audit_enabled: bool,
    pub audit_queue_capacity: usize,
    /// When true, the click origin is read from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            audit_enabled: true,
            audit_queue_capacity: 1000,
            behind_proxy: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let base_url = env::var("BASE_URL").unwrap_or(defaults.base_url);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let default_validity_minutes =
            parse_var("DEFAULT_VALIDITY_MINUTES")?.unwrap_or(defaults.default_validity_minutes);

        let audit_enabled = env::var("AUDIT_ENABLED")
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.audit_enabled);

        let audit_queue_capacity =
            parse_var("AUDIT_QUEUE_CAPACITY")?.unwrap_or(defaults.audit_queue_capacity);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.behind_proxy);

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            default_validity_minutes,
            audit_enabled,
            audit_queue_capacity,
            behind_proxy,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an HTTP(S) URL
    /// - `log_format` is not `text` or `json`
    /// - `default_validity_minutes` is outside 1..=525600
    /// - `audit_queue_capacity` is outside 10..=1000000
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !(1..=MAX_DEFAULT_VALIDITY_MINUTES).contains(&self.default_validity_minutes) {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be between 1 and {}, got {}",
                MAX_DEFAULT_VALIDITY_MINUTES,
                self.default_validity_minutes
            );
        }

        if self.audit_queue_capacity < 10 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY must be at least 10, got {}",
                self.audit_queue_capacity
            );
        }

        if self.audit_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.audit_queue_capacity
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Default validity: {} minutes",
            self.default_validity_minutes
        );

        if self.audit_enabled {
            tracing::info!("  Audit: enabled (queue capacity {})", self.audit_queue_capacity);
        } else {
            tracing::info!("  Audit: disabled");
        }

        tracing::info!("  Behind proxy: {}", self.behind_proxy);
    }
}

/// Parses an optional numeric variable; unset means `None`, garbage is an error.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{name} must be a number, got '{raw}': {e}")),
        Err(_) => Ok(None),
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
