//! Shared application state.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::urls::root_urlconf;
use crate::views::AppResolver;

/// State injected into every handler.
///
/// The route table is compiled once and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AppResolver>,
    /// Redirect unresolved paths to their slashed form (`APPEND_SLASH`).
    pub append_slash: bool,
    /// Include tried routes in 404 details (`DEBUG`).
    pub debug: bool,
}

impl AppState {
    pub fn new(resolver: Arc<AppResolver>, append_slash: bool, debug: bool) -> Self {
        Self {
            resolver,
            append_slash,
            debug,
        }
    }

    /// Compiles the project route table for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if any route fails to compile.
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = root_urlconf(&config.blog_prefix)
            .compile()
            .context("Failed to compile route table")?;
        tracing::info!("Loaded {} route(s)", resolver.route_count());

        Ok(Self::new(
            Arc::new(resolver),
            config.append_slash,
            config.debug,
        ))
    }
}
