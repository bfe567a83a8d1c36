//! HTTP middleware for request processing.
//!
//! Provides trailing-slash redirection and observability middleware.

pub mod append_slash;
pub mod tracing;
