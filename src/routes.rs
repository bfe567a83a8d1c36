//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check (explicit axum route)
//! - everything else - Resolved against the project route table
//!   ([`crate::urls`]) and dispatched to the matching view
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Append slash** - Redirects to the slashed path when enabled
//!
//! Trailing slashes are significant: no path normalization is applied.

use crate::api::handlers::{dispatch_handler, health_handler};
use crate::api::middleware::{append_slash, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(dispatch_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            append_slash::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}
