//! Market data structures consumed by the simulation models.
//!
//! # Components
//!
//! - [`surfaces`]: Local volatility surface (`LocalVolatilitySurface`)

pub mod surfaces;
