//! Bilinear 2D interpolation for surfaces.

use crate::types::{PricingError, Result};
use num_traits::Float;

/// Bilinear interpolator for 2D grid data with flat extrapolation.
///
/// Stores a grid of values z(x, y) and blends the four corners of the cell
/// that brackets a query point. Queries outside the knot rectangle are
/// clamped onto its boundary, so evaluation never fails.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Grid Layout
///
/// Values are stored row-major with x as the row axis:
/// `zs[i * ys.len() + j] = z(xs[i], ys[j])`.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let interp = BilinearInterpolator::<f64>::new(
///     vec![0.0, 1.0, 2.0],
///     vec![0.0, 1.0],
///     vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
/// )
/// .unwrap();
///
/// // Inside the grid
/// assert!((interp.interpolate(0.5, 0.5) - 1.5).abs() < 1e-12);
/// // Beyond the last x knot the value is held flat
/// assert!((interp.interpolate(7.0, 1.0) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearInterpolator<T: Float> {
    /// X-axis knots (strictly increasing)
    xs: Vec<T>,
    /// Y-axis knots (strictly increasing)
    ys: Vec<T>,
    /// Row-major grid values
    zs: Vec<T>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct a bilinear interpolator from grid data.
    ///
    /// # Arguments
    ///
    /// * `xs` - Row-axis knots (strictly increasing, length >= 2)
    /// * `ys` - Column-axis knots (strictly increasing, length >= 2)
    /// * `zs` - Row-major values, length `xs.len() * ys.len()`
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] when an axis has fewer than two
    /// knots, an axis is not strictly increasing, the grid size does not
    /// match the axes, or any input is not finite.
    pub fn new(xs: Vec<T>, ys: Vec<T>, zs: Vec<T>) -> Result<Self> {
        validate_axis("x", &xs)?;
        validate_axis("y", &ys)?;

        let expected = xs.len() * ys.len();
        if zs.len() != expected {
            return Err(PricingError::invalid(
                "BilinearInterpolator::new",
                format!(
                    "grid has {} values but axes require {} ({} x {})",
                    zs.len(),
                    expected,
                    xs.len(),
                    ys.len()
                ),
            ));
        }
        if let Some(idx) = zs.iter().position(|z| !z.is_finite()) {
            return Err(PricingError::invalid(
                "BilinearInterpolator::new",
                format!("grid value at index {} is not finite", idx),
            ));
        }

        Ok(Self { xs, ys, zs })
    }

    /// Interpolate at (x, y), clamping the query into the grid rectangle.
    ///
    /// # Formula
    ///
    /// ```text
    /// z_lo = (1-v)*z00 + v*z01
    /// z_hi = (1-v)*z10 + v*z11
    /// z    = (1-u)*z_lo + u*z_hi
    /// ```
    ///
    /// where `u` and `v` are the normalised coordinates within the cell,
    /// each clamped to `[0, 1]`.
    pub fn interpolate(&self, x: T, y: T) -> T {
        let x = clamp_to(x, &self.xs);
        let y = clamp_to(y, &self.ys);

        let i = left_index(&self.xs, x);
        let j = left_index(&self.ys, y);

        let u = weight(self.xs[i], self.xs[i + 1], x);
        let v = weight(self.ys[j], self.ys[j + 1], y);

        let z00 = self.at(i, j);
        let z01 = self.at(i, j + 1);
        let z10 = self.at(i + 1, j);
        let z11 = self.at(i + 1, j + 1);

        let one = T::one();
        let z_lo = (one - v) * z00 + v * z01;
        let z_hi = (one - v) * z10 + v * z11;
        (one - u) * z_lo + u * z_hi
    }

    /// Return the covered x range.
    #[inline]
    pub fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Return the covered y range.
    #[inline]
    pub fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }

    /// Returns a reference to the x-axis knots.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-axis knots.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the row-major grid values.
    #[inline]
    pub fn zs(&self) -> &[T] {
        &self.zs
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> T {
        self.zs[i * self.ys.len() + j]
    }
}

fn validate_axis<T: Float>(axis: &str, knots: &[T]) -> Result<()> {
    if knots.len() < 2 {
        return Err(PricingError::invalid(
            "BilinearInterpolator::new",
            format!("{}-axis needs at least 2 knots, got {}", axis, knots.len()),
        ));
    }
    if let Some(idx) = knots.iter().position(|k| !k.is_finite()) {
        return Err(PricingError::invalid(
            "BilinearInterpolator::new",
            format!("{}-axis knot at index {} is not finite", axis, idx),
        ));
    }
    if let Some(idx) = knots.windows(2).position(|w| w[1] <= w[0]) {
        return Err(PricingError::invalid(
            "BilinearInterpolator::new",
            format!(
                "{}-axis must be strictly increasing (violated at index {})",
                axis,
                idx + 1
            ),
        ));
    }
    Ok(())
}

#[inline]
fn clamp_to<T: Float>(value: T, knots: &[T]) -> T {
    let lo = knots[0];
    let hi = knots[knots.len() - 1];
    // NaN falls through to the lower edge
    if value >= hi {
        hi
    } else if value >= lo {
        value
    } else {
        lo
    }
}

/// Largest index whose knot is <= `value`, capped at `len - 2`.
#[inline]
fn left_index<T: Float>(knots: &[T], value: T) -> usize {
    let pos = knots.partition_point(|&k| k <= value);
    pos.saturating_sub(1).min(knots.len() - 2)
}

#[inline]
fn weight<T: Float>(lo: T, hi: T, value: T) -> T {
    let span = hi - lo;
    if span <= T::zero() {
        return T::zero();
    }
    ((value - lo) / span).max(T::zero()).min(T::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_grid() -> BilinearInterpolator<f64> {
        BilinearInterpolator::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )
        .unwrap()
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_minimum_grid() {
        let result = BilinearInterpolator::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0; 4]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_insufficient_axis() {
        let err = BilinearInterpolator::new(vec![0.0], vec![0.0, 1.0], vec![0.0, 1.0]).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("at least 2 knots"));

        let err = BilinearInterpolator::new(vec![0.0, 1.0], vec![0.0], vec![0.0, 1.0]).unwrap_err();
        assert!(err.to_string().contains("y-axis"));
    }

    #[test]
    fn test_new_size_mismatch() {
        let err = BilinearInterpolator::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0; 3]).unwrap_err();
        assert!(err.to_string().contains("grid has 3 values"));
    }

    #[test]
    fn test_new_non_increasing_axis() {
        let result = BilinearInterpolator::new(vec![0.0, 0.0], vec![0.0, 1.0], vec![0.0; 4]);
        assert!(result.is_err());

        let result = BilinearInterpolator::new(vec![0.0, 1.0], vec![2.0, 1.0], vec![0.0; 4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_non_finite_values() {
        let result =
            BilinearInterpolator::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, f64::NAN, 0.0, 0.0]);
        assert!(result.is_err());

        let result = BilinearInterpolator::new(
            vec![0.0, f64::INFINITY],
            vec![0.0, 1.0],
            vec![0.0; 4],
        );
        assert!(result.is_err());
    }

    // ========================================
    // Interpolation Tests
    // ========================================

    #[test]
    fn test_interpolate_at_knots() {
        let interp = sample_grid();
        for (i, &x) in [0.0, 1.0, 2.0].iter().enumerate() {
            for (j, &y) in [0.0, 1.0, 2.0].iter().enumerate() {
                assert_relative_eq!(interp.interpolate(x, y), (i * 3 + j) as f64);
            }
        }
    }

    #[test]
    fn test_interpolate_cell_centre() {
        let interp = sample_grid();
        // Average of 0, 1, 3, 4
        assert_relative_eq!(interp.interpolate(0.5, 0.5), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_linear_surface_exact() {
        // z = 3x + y is reproduced exactly by bilinear interpolation
        let interp = sample_grid();
        assert_relative_eq!(interp.interpolate(1.25, 0.75), 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_clamps_outside_domain() {
        let interp = sample_grid();
        assert_relative_eq!(interp.interpolate(-1.0, -1.0), 0.0);
        assert_relative_eq!(interp.interpolate(5.0, 5.0), 8.0);
        assert_relative_eq!(interp.interpolate(5.0, 0.5), 6.5, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(0.5, -3.0), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_left_index_saturates() {
        let knots = [0.0, 1.0, 2.0];
        assert_eq!(left_index(&knots, 0.0), 0);
        assert_eq!(left_index(&knots, 0.5), 0);
        assert_eq!(left_index(&knots, 1.0), 1);
        assert_eq!(left_index(&knots, 2.0), 1);
    }

    #[test]
    fn test_domain_accessors() {
        let interp = sample_grid();
        assert_eq!(interp.domain_x(), (0.0, 2.0));
        assert_eq!(interp.domain_y(), (0.0, 2.0));
        assert_eq!(interp.xs().len(), 3);
        assert_eq!(interp.zs().len(), 9);
    }

    #[test]
    fn test_interpolate_f32() {
        let interp =
            BilinearInterpolator::new(vec![0.0_f32, 1.0], vec![0.0, 1.0], vec![0.0, 1.0, 2.0, 3.0])
                .unwrap();
        assert!((interp.interpolate(0.5_f32, 0.5) - 1.5).abs() < 1e-6);
    }
}
