//! HTTP error type and JSON error body.

use axum::{
    Json,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::routing::{ResolveError, ReverseError};
use crate::utils::path_encoding::PathDecodingError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation {
        message: String,
        details: Value,
    },
    NotFound {
        message: String,
        details: Value,
    },
    MethodNotAllowed {
        allowed: Vec<Method>,
        details: Value,
    },
    Internal {
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn method_not_allowed(allowed: &[Method], details: Value) -> Self {
        Self::MethodNotAllowed {
            allowed: allowed.to_vec(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut allow = None;

        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::MethodNotAllowed { allowed, details } => {
                allow = Some(allow_header(&allowed));
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    "method_not_allowed",
                    "Method not allowed".to_string(),
                    details,
                )
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(allow) = allow
            && let Ok(value) = HeaderValue::from_str(&allow)
        {
            response.headers_mut().insert(header::ALLOW, value);
        }
        response
    }
}

/// Formats methods for an `Allow` header, e.g. `GET, HEAD, OPTIONS`.
pub fn allow_header(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        AppError::not_found("No route matches the requested path", json!({ "path": e.path }))
    }
}

impl From<ReverseError> for AppError {
    fn from(e: ReverseError) -> Self {
        tracing::error!("Failed to reverse route: {}", e);
        AppError::internal("Failed to build URL", json!({}))
    }
}

impl From<PathDecodingError> for AppError {
    fn from(e: PathDecodingError) -> Self {
        AppError::bad_request(e.to_string(), json!({}))
    }
}
