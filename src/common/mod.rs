// Common utilities and shared types used across the crate

pub mod constants;
pub mod error;

pub use error::{CatalogError, Result};
