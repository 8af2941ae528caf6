//! Numerical building blocks.
//!
//! - [`interpolators`]: Grid interpolation used by market data surfaces

pub mod interpolators;
