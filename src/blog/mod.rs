//! The blog application.
//!
//! - [`urls`] - the application's route table
//! - [`views`] - the views its routes dispatch to

pub mod urls;
pub mod views;
