//! # myblog
//!
//! Blog entry routing service built with Axum.
//!
//! Routes are declared in path-converter syntax and resolved by the crate's
//! own router:
//!
//! ```text
//! <int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/   ->   entry_detail
//! ```
//!
//! ## Architecture
//!
//! - **Routing** ([`routing`]) - Converters, route patterns, resolver and reverser
//! - **Blog** ([`blog`]) - The application's route table and views
//! - **Views** ([`views`]) - The view trait routes dispatch to
//! - **API Layer** ([`api`]) - Dispatch handler, health check and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export BLOG_PREFIX="blog/"   # Optional
//! cargo run
//!
//! curl http://localhost:3000/blog/2024/3/15/42-hello-world/
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod blog;
pub mod error;
pub mod routing;
pub mod state;
pub mod urls;
pub mod utils;
pub mod views;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::error::AppError;
    pub use crate::routing::{PathKwargs, PathValue, UrlConf, UrlResolver};
    pub use crate::state::AppState;
    pub use crate::views::{View, ViewHandle, ViewRequest};
}
