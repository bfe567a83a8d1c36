//! Typed URL routing.
//!
//! Routes are written in path-converter syntax (`<int:year>/<slug:slug>/`),
//! collected into a [`UrlConf`] and compiled once into an immutable
//! [`UrlResolver`] that maps request paths to views and view names back to
//! paths.
//!
//! # Modules
//!
//! - [`converter`] - Placeholder types and captured values
//! - [`pattern`] - Route string parsing, matching and reversal
//! - [`resolver`] - Route tables, includes and namespaces
//! - [`error`] - Routing error types

pub mod converter;
pub mod error;
pub mod pattern;
pub mod resolver;

pub use converter::{Converter, PathKwargs, PathValue};
pub use error::{ConverterError, PatternError, ResolveError, ReverseError};
pub use pattern::{RoutePattern, Segment};
pub use resolver::{ResolvedRoute, ResolverMatch, RouteInfo, UrlConf, UrlResolver};
