//! HTTP layer.
//!
//! Translates HTTP requests into route resolution and view dispatch, and
//! formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
