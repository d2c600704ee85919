//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Redis connection
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! or, component by component:
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8081`)
//! - `BASE_URL` - Prefix of every returned short URL (default: `http://127.0.0.1:8081`)
//! - `ID_LENGTH` - Symbols per generated identifier (default: 6, range: 4-16)
//! - `ID_MAX_ATTEMPTS` - Candidates drawn before giving up (default: 10, range: 1-100)
//! - `STORE_TIMEOUT_MS` - Deadline for each store call (default: 500)
//! - `METRICS_LISTEN` - Prometheus exporter address (default: `0.0.0.0:5070`, empty disables)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub redis_url: String,
    pub id_length: usize,
    pub id_max_attempts: u32,
    /// Deadline applied to every individual store call, in milliseconds.
    pub store_timeout_ms: u64,
    /// `None` when the Prometheus exporter is disabled.
    pub metrics_listen: Option<String>,
    pub log_level: String,
    pub log_format: String,
}

/// Reads and parses `key`, falling back to `default` when unset.
///
/// A set but unparsable value is an error rather than a silent default.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable has a default.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    /// Range checks are left to [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8081".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8081".to_string());
        let redis_url = Self::load_redis_url();

        let id_length = parse_var("ID_LENGTH", 6)?;
        let id_max_attempts = parse_var("ID_MAX_ATTEMPTS", 10)?;
        let store_timeout_ms = parse_var("STORE_TIMEOUT_MS", 500)?;

        let metrics_listen = match env::var("METRICS_LISTEN") {
            Ok(addr) if addr.trim().is_empty() => None,
            Ok(addr) => Some(addr),
            Err(_) => Some("0.0.0.0:5070".to_string()),
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            base_url,
            redis_url,
            id_length,
            id_max_attempts,
            store_timeout_ms,
            metrics_listen,
            log_level,
            log_format,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let host = env::var("REDIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match env::var("REDIS_PASSWORD") {
            // Empty password means no authentication
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` or `metrics_listen` is not a socket address
    /// - `base_url` is not an http(s) URL
    /// - `redis_url` does not use a Redis scheme
    /// - `id_length`, `id_max_attempts` or `store_timeout_ms` is out of range
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        self.listen_addr.parse::<SocketAddr>().with_context(|| {
            format!("LISTEN must be in format 'host:port', got '{}'", self.listen_addr)
        })?;

        if let Some(ref addr) = self.metrics_listen {
            addr.parse::<SocketAddr>().with_context(|| {
                format!("METRICS_LISTEN must be in format 'host:port', got '{}'", addr)
            })?;
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        if !(4..=16).contains(&self.id_length) {
            anyhow::bail!("ID_LENGTH must be between 4 and 16, got {}", self.id_length);
        }

        if !(1..=100).contains(&self.id_max_attempts) {
            anyhow::bail!(
                "ID_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.id_max_attempts
            );
        }

        if self.store_timeout_ms == 0 {
            anyhow::bail!("STORE_TIMEOUT_MS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Parsed listen address.
    pub fn listen_socket(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address '{}'", self.listen_addr))
    }

    /// Parsed metrics exporter address, `None` when disabled.
    pub fn metrics_socket(&self) -> Result<Option<SocketAddr>> {
        self.metrics_listen
            .as_deref()
            .map(|addr| {
                addr.parse()
                    .with_context(|| format!("Invalid metrics address '{}'", addr))
            })
            .transpose()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Redis: {}", mask_connection_string(&self.redis_url));
        tracing::info!(
            "  Identifiers: {} symbols, {} attempts",
            self.id_length,
            self.id_max_attempts
        );
        tracing::info!("  Store timeout: {}ms", self.store_timeout_ms);

        match self.metrics_listen {
            Some(ref addr) => tracing::info!("  Metrics: http://{}/metrics", addr),
            None => tracing::info!("  Metrics: disabled"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
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
