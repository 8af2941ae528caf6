//! Interest rate stochastic models.
//!
//! This module provides short-rate processes:
//! - [`VasicekModel`]: Mean-reverting Gaussian short rate
//!
//! # Models
//!
//! ## Vasicek
//!
//! ```text
//! dr(t) = a * (b - r(t)) * dt + sigma * dW(t)
//! ```
//!
//! Rates are Gaussian and can become negative.

pub mod vasicek;

pub use vasicek::VasicekModel;
