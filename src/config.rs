//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export BLOG_PREFIX="blog/"
//! export APPEND_SLASH="true"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BLOG_PREFIX` - Route prefix the blog is mounted under (default: empty)
//! - `APPEND_SLASH` - Redirect `/path` to `/path/` when only the latter resolves
//!   (default: `false`)
//! - `DEBUG` - List tried routes in 404 responses (default: `false`)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Route prefix of the blog routes, empty or ending in `/` (e.g. `blog/`).
    pub blog_prefix: String,
    pub append_slash: bool,
    /// Exposes the route table in 404 details. Never enable in production.
    pub debug: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// All variables are optional; unset ones fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let blog_prefix = env::var("BLOG_PREFIX").unwrap_or_default();

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            blog_prefix,
            append_slash: env_flag("APPEND_SLASH"),
            debug: env_flag("DEBUG"),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `blog_prefix` starts with `/`, or is non-empty without a trailing `/`
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.blog_prefix.starts_with('/') {
            anyhow::bail!(
                "BLOG_PREFIX must not start with '/', got '{}'",
                self.blog_prefix
            );
        }

        if !self.blog_prefix.is_empty() && !self.blog_prefix.ends_with('/') {
            anyhow::bail!(
                "BLOG_PREFIX must end with '/', got '{}'",
                self.blog_prefix
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Blog prefix: /{}", self.blog_prefix);
        tracing::info!("  Append slash: {}", self.append_slash);

        if self.debug {
            tracing::warn!("  Debug: enabled (404 responses list the route table)");
        }
    }
}

/// Reads a boolean flag; `true` (any case) and `1` enable it.
fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
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
