//! Sampled and mutable capabilities plus the algorithm shared by every storage.
//!
//! A tabulated function is described by a handful of storage primitives
//! (indexed access, bounds, floor lookup, linear interpolation and
//! extrapolation). Evaluation dispatch, rendering and input validation are
//! written once here against those primitives.

use std::fmt;

use tracing::error;

use super::MathFunction;
use crate::types::{Point, TabulatedError};

/// Minimum number of samples every tabulated function holds.
pub const MIN_COUNT: usize = 2;

/// A function represented by a finite ordered sample of `(x, y)` pairs.
///
/// # Storage primitives
///
/// Implementations supply indexed access, bounds, `floor_index_of_x`,
/// `extrapolate_left`/`extrapolate_right` and `interpolate`. The provided
/// [`try_apply`](TabulatedFunction::try_apply) combines them:
///
/// - `x < left_bound` → `extrapolate_left(x)`
/// - `x > right_bound` → `extrapolate_right(x)`
/// - exact sample match → that sample's `y`
/// - otherwise → `interpolate(x, floor_index_of_x(x))`
///
/// # Duplicate x values
///
/// Construction accepts non-decreasing x (see [`check_sorted`]). With
/// duplicated x the results of `index_of_x`, `insert` and interpolation on
/// the zero-width interval are undefined.
pub trait TabulatedFunction: MathFunction {
    /// Number of samples (always at least [`MIN_COUNT`]).
    fn count(&self) -> usize;

    /// x value of the sample at `index`.
    fn get_x(&self, index: usize) -> Result<f64, TabulatedError>;

    /// y value of the sample at `index`.
    fn get_y(&self, index: usize) -> Result<f64, TabulatedError>;

    /// Overwrite the y value of the sample at `index`.
    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedError>;

    /// Index of the first sample whose x equals `x` exactly.
    fn index_of_x(&self, x: f64) -> Option<usize>;

    /// Index of the first sample whose y equals `y` exactly.
    fn index_of_y(&self, y: f64) -> Option<usize>;

    /// Smallest sampled x.
    fn left_bound(&self) -> f64;

    /// Largest sampled x.
    fn right_bound(&self) -> f64;

    /// Index `i` with `x_i <= x < x_{i+1}`.
    ///
    /// Fails with `Domain` when `x` is below the left bound; returns
    /// `count - 1` when `x` is at or beyond the right bound.
    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedError>;

    /// Linear projection through the two leftmost samples.
    fn extrapolate_left(&self, x: f64) -> f64;

    /// Linear projection through the two rightmost samples.
    fn extrapolate_right(&self, x: f64) -> f64;

    /// Linear interpolation on `[x_i, x_{i+1}]` with `i = floor_index`.
    ///
    /// `Domain` if `x` lies outside that interval, `IndexOutOfBounds` if
    /// `floor_index` does not start an interval.
    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedError>;

    /// Forward sequence of exactly `count` point snapshots.
    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_>;

    /// Evaluate with the interpolation/extrapolation rule, surfacing
    /// invariant breaches as errors.
    fn try_apply(&self, x: f64) -> Result<f64, TabulatedError> {
        if x < self.left_bound() {
            return Ok(self.extrapolate_left(x));
        }
        if x > self.right_bound() {
            return Ok(self.extrapolate_right(x));
        }
        if let Some(index) = self.index_of_x(x) {
            return self.get_y(index);
        }
        let floor_index = self.floor_index_of_x(x)?;
        self.interpolate(x, floor_index)
    }

    /// Collect [`points`](TabulatedFunction::points) into a vector.
    fn to_points(&self) -> Vec<Point> {
        self.points().collect()
    }
}

/// Adds samples while keeping x ascending.
pub trait Insertable {
    /// Insert `(x, y)`; overwrites `y` when a sample at `x` already exists.
    ///
    /// Placement of a NaN `x` is undefined and breaks the ascending order.
    fn insert(&mut self, x: f64, y: f64);
}

/// Removes samples, never below [`MIN_COUNT`].
pub trait Removable {
    /// Remove the sample at `index`.
    ///
    /// Refused with `InsufficientData` when only [`MIN_COUNT`] samples remain;
    /// the function is left unchanged.
    fn remove(&mut self, index: usize) -> Result<(), TabulatedError>;
}

/// `MathFunction::apply` for tabulated storages.
///
/// Well-formed instances never fail; a breach is logged and yields NaN.
pub(crate) fn apply_or_nan<F>(function: &F, x: f64) -> f64
where
    F: TabulatedFunction + ?Sized,
{
    match function.try_apply(x) {
        Ok(y) => y,
        Err(err) => {
            error!(x, %err, "tabulated evaluation failed");
            f64::NAN
        }
    }
}

/// Value at `x` of the line through `(left_x, left_y)` and `(right_x, right_y)`.
#[inline]
pub fn interpolate_linear(x: f64, left_x: f64, right_x: f64, left_y: f64, right_y: f64) -> f64 {
    left_y + (right_y - left_y) * (x - left_x) / (right_x - left_x)
}

/// Fails with `LengthMismatch` unless both arrays have the same length.
pub fn check_length_is_the_same(x_values: &[f64], y_values: &[f64]) -> Result<(), TabulatedError> {
    if x_values.len() != y_values.len() {
        return Err(TabulatedError::LengthMismatch {
            x_len: x_values.len(),
            y_len: y_values.len(),
        });
    }
    Ok(())
}

/// Fails with `NotSorted` unless `x_values` is non-decreasing.
///
/// Equal neighbours are accepted.
pub fn check_sorted(x_values: &[f64]) -> Result<(), TabulatedError> {
    match x_values.windows(2).position(|pair| !(pair[0] <= pair[1])) {
        Some(position) => Err(TabulatedError::NotSorted {
            index: position + 1,
        }),
        None => Ok(()),
    }
}

/// Fails with `InsufficientData` below [`MIN_COUNT`] samples.
pub fn check_count(count: usize) -> Result<(), TabulatedError> {
    if count < MIN_COUNT {
        return Err(TabulatedError::InsufficientData {
            got: count,
            need: MIN_COUNT,
        });
    }
    Ok(())
}

/// All construction checks, in the order they are reported.
pub(crate) fn validate_samples(x_values: &[f64], y_values: &[f64]) -> Result<(), TabulatedError> {
    check_length_is_the_same(x_values, y_values)?;
    check_count(x_values.len())?;
    check_sorted(x_values)
}

/// Uniform grid of `count` points over `[from, to]` (swapped if reversed).
///
/// `from == to` yields `count` copies of that point.
pub(crate) fn uniform_grid(from: f64, to: f64, count: usize) -> Result<Vec<f64>, TabulatedError> {
    check_count(count)?;
    let (from, to) = if from > to { (to, from) } else { (from, to) };
    if from == to {
        return Ok(vec![from; count]);
    }
    let step = (to - from) / (count - 1) as f64;
    let mut grid: Vec<f64> = (0..count).map(|i| from + step * i as f64).collect();
    // pin the last node to `to` so rounding never overshoots the bound
    grid[count - 1] = to;
    Ok(grid)
}

/// Header line plus one `[x; y]` line per sample.
pub fn render<F>(function: &F, tag: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    F: TabulatedFunction + ?Sized,
{
    write!(f, "{} size = {}", tag, function.count())?;
    for point in function.points() {
        write!(f, "\n{}", point)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_linear_midpoint() {
        assert_eq!(interpolate_linear(1.0, 0.0, 2.0, 0.0, 4.0), 2.0);
    }

    #[test]
    fn test_interpolate_linear_outside_segment_extrapolates() {
        assert_eq!(interpolate_linear(3.0, 0.0, 2.0, 0.0, 4.0), 6.0);
        assert_eq!(interpolate_linear(-1.0, 0.0, 2.0, 0.0, 4.0), -2.0);
    }

    #[test]
    fn test_check_length_is_the_same() {
        assert!(check_length_is_the_same(&[1.0, 2.0], &[3.0, 4.0]).is_ok());
        assert_eq!(
            check_length_is_the_same(&[1.0, 2.0, 3.0], &[3.0, 4.0]),
            Err(TabulatedError::LengthMismatch { x_len: 3, y_len: 2 })
        );
    }

    #[test]
    fn test_check_sorted_accepts_duplicates() {
        assert!(check_sorted(&[0.0, 1.0, 1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_check_sorted_reports_first_violation() {
        assert_eq!(
            check_sorted(&[0.0, 2.0, 1.0, 0.5]),
            Err(TabulatedError::NotSorted { index: 2 })
        );
    }

    #[test]
    fn test_check_sorted_rejects_nan() {
        assert!(check_sorted(&[0.0, f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_check_count() {
        assert!(check_count(2).is_ok());
        assert_eq!(
            check_count(1),
            Err(TabulatedError::InsufficientData { got: 1, need: 2 })
        );
    }

    #[test]
    fn test_validate_samples_order() {
        // length mismatch is reported before the count check
        assert!(matches!(
            validate_samples(&[0.0], &[]),
            Err(TabulatedError::LengthMismatch { .. })
        ));
        assert!(matches!(
            validate_samples(&[0.0], &[1.0]),
            Err(TabulatedError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_uniform_grid() {
        assert_eq!(uniform_grid(0.0, 4.0, 5).unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(uniform_grid(4.0, 0.0, 3).unwrap(), vec![0.0, 2.0, 4.0]);
        assert_eq!(uniform_grid(1.5, 1.5, 3).unwrap(), vec![1.5, 1.5, 1.5]);
        assert!(uniform_grid(0.0, 1.0, 1).is_err());
    }
}
