//! Views: the handlers routes resolve to.
//!
//! The HTTP layer resolves the request path, then hands the view a
//! [`ViewRequest`] carrying the method and the [`ResolvedRoute`]. Views are
//! stored in the route table as [`ViewHandle`]s.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, allow_header};
use crate::routing::{ResolvedRoute, UrlResolver};
use crate::state::AppState;

/// Shared, type-erased view stored in the route table.
pub type ViewHandle = Arc<dyn View>;

/// Route table of the application.
pub type AppResolver = UrlResolver<ViewHandle>;

/// A request that has been matched to a route.
#[derive(Debug, Clone)]
pub struct ViewRequest {
    pub method: Method,
    /// Decoded request path.
    pub path: String,
    pub query: Option<String>,
    pub resolved: ResolvedRoute,
}

/// Handler bound to a route.
///
/// # Implementations
///
/// - [`crate::blog::views::EntryDetail`] - the `entry_detail` route
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait View: Send + Sync {
    /// Produces the response for a resolved request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] for anything that should become an error response,
    /// e.g. [`AppError::MethodNotAllowed`] for unsupported methods.
    async fn dispatch(&self, state: AppState, request: ViewRequest) -> Result<Response, AppError>;
}

/// Answers `OPTIONS` with an empty `200` and the `Allow` header.
pub fn options_response(allowed: &[Method]) -> Response {
    let mut response = StatusCode::OK.into_response();
    if let Ok(value) = HeaderValue::from_str(&allow_header(allowed)) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
