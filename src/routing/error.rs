//! Error types for route compilation, resolution and reversal.

use thiserror::Error;

/// A captured path segment could not be converted to its typed value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConverterError {
    #[error("integer out of range: {0}")]
    IntOutOfRange(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

/// A route string could not be compiled into a [`RoutePattern`](super::RoutePattern).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("route '{route}' uses unknown converter '{converter}'")]
    UnknownConverter { route: String, converter: String },

    #[error("route '{route}' uses parameter name '{name}' which is not a valid identifier")]
    InvalidParameterName { route: String, name: String },

    #[error("route '{route}' uses parameter name '{name}' more than once")]
    DuplicateParameter { route: String, name: String },

    #[error("route '{route}' has unbalanced angle brackets")]
    UnbalancedBracket { route: String },

    #[error("route length {len} exceeds maximum allowed length of {max} bytes")]
    TooLong { len: usize, max: usize },

    #[error("failed to compile route '{route}': {reason}")]
    Regex { route: String, reason: String },
}

/// No route matched the requested path.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no route matches '{path}'")]
pub struct ResolveError {
    pub path: String,
    /// Full routes that were tried, in order.
    pub tried: Vec<String>,
}

/// A view name and arguments could not be turned back into a path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReverseError {
    #[error("'{0}' is not a registered namespace")]
    UnknownNamespace(String),

    #[error("reverse for '{view_name}' not found; tried: {tried:?}")]
    NoReverseMatch {
        view_name: String,
        /// Full routes registered under the name whose arguments did not fit.
        tried: Vec<String>,
    },
}
