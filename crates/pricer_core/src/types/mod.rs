//! Core error types shared by every layer.
//!
//! # Re-exports
//!
//! - [`PricingError`] and [`Result`] from `error`

pub mod error;

pub use error::{PricingError, Result};
