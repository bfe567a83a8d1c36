//! Handler that routes every request without an explicit axum route.

use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::routing::ResolveError;
use crate::state::AppState;
use crate::utils::path_encoding::decode_path;
use crate::views::ViewRequest;

/// Resolves the request path against the route table and runs the view.
///
/// # Request Flow
///
/// 1. Percent-decode the path
/// 2. Resolve it (first matching route wins)
/// 3. Call the view with the method and the resolved route
///
/// # Errors
///
/// - **400 Bad Request** if the decoded path is not valid UTF-8
/// - **404 Not Found** if no route matches; with `DEBUG` enabled the error
///   details list the routes that were tried
/// - Whatever the view returns
pub async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = decode_path(uri.path())?;

    let (view, resolved) = match state.resolver.resolve(&path) {
        Ok(found) => (found.view.clone(), found.resolved),
        Err(e) => return Err(not_found(&state, e)),
    };

    debug!(
        path = %path,
        route = %resolved.route,
        view_name = resolved.view_name().as_deref().unwrap_or("-"),
        "Dispatching to view"
    );

    let request = ViewRequest {
        method,
        path,
        query: uri.query().map(str::to_string),
        resolved,
    };

    view.dispatch(state, request).await
}

fn not_found(state: &AppState, e: ResolveError) -> AppError {
    debug!(path = %e.path, tried = e.tried.len(), "No route matched");

    if state.debug {
        AppError::not_found(
            "No route matches the requested path",
            json!({ "path": e.path, "tried": e.tried }),
        )
    } else {
        AppError::from(e)
    }
}
