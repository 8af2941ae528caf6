//! Interpolation methods for numerical computation.
//!
//! ## Available Interpolators
//!
//! - [`BilinearInterpolator`]: 2D grid interpolation with edge clamping
//!
//! The kernel is generic over `T: num_traits::Float` so that it can be
//! evaluated with `f64` and `f32` alike.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::BilinearInterpolator;
//!
//! let interp = BilinearInterpolator::<f64>::new(
//!     vec![0.0, 1.0],
//!     vec![0.0, 1.0],
//!     vec![0.0, 1.0, 2.0, 3.0],
//! )
//! .unwrap();
//!
//! assert!((interp.interpolate(0.5, 0.5) - 1.5).abs() < 1e-12);
//! ```

mod bilinear;

pub use bilinear::BilinearInterpolator;
