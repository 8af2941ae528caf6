//! # pricer_core: Foundation Layer for Path Simulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Error types: [`PricingError`](types::PricingError) and the crate-wide
//!   [`Result`](types::Result) alias (`types::error`)
//! - Grid interpolation with edge clamping (`math::interpolators`)
//! - The local volatility surface used as a diffusion coefficient
//!   (`market_data::surfaces`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Float bound for the interpolation kernel
//! - thiserror: Error derivation
//! - serde: Surface deserialisation (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::surfaces::LocalVolatilitySurface;
//!
//! let surface = LocalVolatilitySurface::new(
//!     vec![0.2, 0.5, 0.8],
//!     vec![90.0, 100.0, 110.0],
//!     vec![0.20, 0.19, 0.21, 0.22, 0.20, 0.23, 0.25, 0.24, 0.26],
//! )
//! .unwrap();
//!
//! assert!((surface.sigma(0.2, 100.0) - 0.19).abs() < 1e-12);
//! // Queries outside the grid clamp to the nearest edge
//! assert!((surface.sigma(1.1, 110.0) - 0.26).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable deserialisation for [`LocalVolatilitySurface`](market_data::surfaces::LocalVolatilitySurface)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
