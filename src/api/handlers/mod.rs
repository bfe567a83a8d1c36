//! HTTP request handlers.
//!
//! - [`dispatch`] - Resolves every unrouted request against the route table
//! - [`health`] - Service health

pub mod dispatch;
pub mod health;

pub use dispatch::dispatch_handler;
pub use health::health_handler;
