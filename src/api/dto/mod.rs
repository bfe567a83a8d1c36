//! Response bodies of the HTTP layer.

pub mod entry;
pub mod health;
