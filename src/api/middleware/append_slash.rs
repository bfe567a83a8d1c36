//! Trailing-slash redirection middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, Uri, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;
use crate::utils::path_encoding::decode_path;

/// Redirects to the slashed path when only that one resolves.
///
/// Active when `APPEND_SLASH` is enabled. A `GET` or `HEAD` request whose
/// path does not end in `/`, does not resolve, but resolves once `/` is
/// appended gets `301 Moved Permanently` to the slashed path, query string
/// preserved. Everything else passes through untouched.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .fallback(dispatch_handler)
///     .layer(middleware::from_fn_with_state(state.clone(), append_slash::layer))
///     .with_state(state);
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if state.append_slash
        && let Some(target) = redirect_target(&state, req.method(), req.uri())
    {
        tracing::debug!(from = %req.uri(), to = %target, "Appending slash");
        return moved_permanently(&target);
    }

    next.run(req).await
}

/// Slashed location for `uri`, if the redirect applies.
fn redirect_target(state: &AppState, method: &Method, uri: &Uri) -> Option<String> {
    if !matches!(*method, Method::GET | Method::HEAD) {
        return None;
    }

    let path = uri.path();
    if path.ends_with('/') {
        return None;
    }

    let decoded = decode_path(path).ok()?;
    if state.resolver.resolve(&decoded).is_ok() {
        return None;
    }
    state.resolver.resolve(&format!("{decoded}/")).ok()?;

    let mut target = format!("{path}/");
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }
    Some(target)
}

fn moved_permanently(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
