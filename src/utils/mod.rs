//! Utility functions shared by the routing and HTTP layers.
//!
//! - [`path_encoding`] - Percent-decoding of request paths and encoding of
//!   reversed paths

pub mod path_encoding;
