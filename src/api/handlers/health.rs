//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthResponse, HealthStatus, RouteCheck, RouteTableSummary};
use crate::blog::urls::ENTRY_DETAIL;
use crate::blog::views::EntryDetailPath;
use crate::state::AppState;

/// Returns service health with checks against the compiled route table.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All checks passed
/// - **503 Service Unavailable**: One or more checks failed
///
/// # Checks
///
/// 1. **routes**: The route table is not empty
/// 2. **entry_detail**: A sample entry path reverses and resolves back to
///    `entry_detail`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "routes": { "total": 1, "named": ["entry_detail"] },
///   "checks": [
///     { "name": "routes", "passed": true, "message": "1 route(s) loaded" },
///     { "name": "entry_detail", "passed": true, "message": "/2000/1/1/1-health/" }
///   ]
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let routes = state.resolver.routes();
    let summary = RouteTableSummary {
        total: routes.len(),
        named: routes.into_iter().filter_map(|info| info.view_name).collect(),
    };

    let checks = vec![check_routes(summary.total), check_entry_detail(&state)];
    let healthy = checks.iter().all(|check| check.passed);

    let response = HealthResponse {
        status: if healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        routes: summary,
        checks,
    };

    if healthy {
        Ok(Json(response))
    } else {
        tracing::warn!("Health check degraded");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_routes(total: usize) -> RouteCheck {
    if total == 0 {
        RouteCheck::failed("routes", "No routes loaded")
    } else {
        RouteCheck::passed("routes", format!("{total} route(s) loaded"))
    }
}

/// Reverses a sample entry and resolves the result again.
fn check_entry_detail(state: &AppState) -> RouteCheck {
    let sample = EntryDetailPath {
        year: 2000,
        month: 1,
        day: 1,
        pk: 1,
        slug: "health".to_string(),
    };

    let path = match state.resolver.reverse(ENTRY_DETAIL, &sample.to_kwargs()) {
        Ok(path) => path,
        Err(e) => return RouteCheck::failed("entry_detail", e.to_string()),
    };

    match state.resolver.resolve(&path) {
        Ok(found) if found.resolved.view_name().as_deref() == Some(ENTRY_DETAIL) => {
            RouteCheck::passed("entry_detail", path)
        }
        Ok(found) => RouteCheck::failed(
            "entry_detail",
            format!("{path} resolves to route {}", found.resolved.route),
        ),
        Err(e) => RouteCheck::failed("entry_detail", e.to_string()),
    }
}
