//! Volatility surfaces used as diffusion coefficients.
//!
//! This module provides:
//! - [`LocalVolatilitySurface`]: Time/spot grid of local volatilities with
//!   bilinear interpolation and flat extrapolation

mod local_vol;

pub use local_vol::LocalVolatilitySurface;
