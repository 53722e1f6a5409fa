//! Array-backed tabulated function.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::traits::tabulated::{apply_or_nan, render, uniform_grid, validate_samples};
use crate::traits::{
    interpolate_linear, Insertable, MathFunction, Removable, TabulatedFunction, MIN_COUNT,
};
use crate::types::point::{hash_bits, lossless};
use crate::types::{Point, TabulatedError};

/// Tabulated function stored as two parallel vectors.
///
/// Indexed access and `set_y` are O(1); lookups by value, floor search and
/// structural mutation are O(n).
///
/// # Example
///
/// ```
/// use tabulated_core::functions::ArrayTabulatedFunction;
/// use tabulated_core::traits::{MathFunction, TabulatedFunction};
///
/// let f = ArrayTabulatedFunction::new(&[0.0, 2.0], &[0.0, 4.0]).unwrap();
/// assert_eq!(f.count(), 2);
/// assert_eq!(f.apply(1.0), 2.0);
/// assert_eq!(f.apply(3.0), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSamples", into = "RawSamples")]
pub struct ArrayTabulatedFunction {
    /// Sample x values, non-decreasing
    x_values: Vec<f64>,
    /// Sample y values, same length as `x_values`
    y_values: Vec<f64>,
}

/// Unvalidated serde form; conversion back re-runs the construction checks.
#[derive(Serialize, Deserialize)]
struct RawSamples {
    #[serde(with = "lossless::vec")]
    x_values: Vec<f64>,
    #[serde(with = "lossless::vec")]
    y_values: Vec<f64>,
}

impl TryFrom<RawSamples> for ArrayTabulatedFunction {
    type Error = TabulatedError;

    fn try_from(raw: RawSamples) -> Result<Self, Self::Error> {
        validate_samples(&raw.x_values, &raw.y_values)?;
        Ok(Self {
            x_values: raw.x_values,
            y_values: raw.y_values,
        })
    }
}

impl From<ArrayTabulatedFunction> for RawSamples {
    fn from(function: ArrayTabulatedFunction) -> Self {
        Self {
            x_values: function.x_values,
            y_values: function.y_values,
        }
    }
}

impl ArrayTabulatedFunction {
    /// Construct from sample arrays (copied).
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` - arrays of different lengths
    /// * `InsufficientData` - fewer than two samples
    /// * `NotSorted` - x values decrease somewhere
    pub fn new(x_values: &[f64], y_values: &[f64]) -> Result<Self, TabulatedError> {
        validate_samples(x_values, y_values)?;
        Ok(Self {
            x_values: x_values.to_vec(),
            y_values: y_values.to_vec(),
        })
    }

    /// Sample `source` at `count` evenly spaced points over `[from, to]`.
    ///
    /// Bounds are swapped when `from > to`; `from == to` gives `count`
    /// identical samples.
    ///
    /// # Example
    ///
    /// ```
    /// use tabulated_core::functions::{ArrayTabulatedFunction, SqrFunction};
    /// use tabulated_core::traits::TabulatedFunction;
    ///
    /// let f = ArrayTabulatedFunction::from_function(&SqrFunction, 2.0, 0.0, 3).unwrap();
    /// assert_eq!(f.get_x(0).unwrap(), 0.0);
    /// assert_eq!(f.get_y(2).unwrap(), 4.0);
    /// ```
    pub fn from_function<S>(source: &S, from: f64, to: f64, count: usize) -> Result<Self, TabulatedError>
    where
        S: MathFunction + ?Sized,
    {
        let x_values = uniform_grid(from, to, count)?;
        let y_values = x_values.iter().map(|&x| source.apply(x)).collect();
        Ok(Self { x_values, y_values })
    }

    /// Sample x values.
    #[inline]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// Sample y values.
    #[inline]
    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), TabulatedError> {
        if index >= self.x_values.len() {
            return Err(TabulatedError::IndexOutOfBounds {
                index,
                count: self.x_values.len(),
            });
        }
        Ok(())
    }
}

impl MathFunction for ArrayTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        apply_or_nan(self, x)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    #[inline]
    fn count(&self) -> usize {
        self.x_values.len()
    }

    fn get_x(&self, index: usize) -> Result<f64, TabulatedError> {
        self.check_index(index)?;
        Ok(self.x_values[index])
    }

    fn get_y(&self, index: usize) -> Result<f64, TabulatedError> {
        self.check_index(index)?;
        Ok(self.y_values[index])
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedError> {
        self.check_index(index)?;
        self.y_values[index] = value;
        Ok(())
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.x_values.iter().position(|&value| value == x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.y_values.iter().position(|&value| value == y)
    }

    #[inline]
    fn left_bound(&self) -> f64 {
        self.x_values[0]
    }

    #[inline]
    fn right_bound(&self) -> f64 {
        self.x_values[self.x_values.len() - 1]
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedError> {
        let count = self.x_values.len();
        if x < self.left_bound() {
            return Err(TabulatedError::Domain {
                x,
                left: self.left_bound(),
                right: self.right_bound(),
            });
        }
        if x >= self.right_bound() {
            return Ok(count - 1);
        }
        // x_0 <= x < x_{n-1}, so some interval straddles x
        Ok((0..count - 1)
            .find(|&i| x < self.x_values[i + 1])
            .unwrap_or(count - 2))
    }

    fn extrapolate_left(&self, x: f64) -> f64 {
        interpolate_linear(
            x,
            self.x_values[0],
            self.x_values[1],
            self.y_values[0],
            self.y_values[1],
        )
    }

    fn extrapolate_right(&self, x: f64) -> f64 {
        let last = self.x_values.len() - 1;
        interpolate_linear(
            x,
            self.x_values[last - 1],
            self.x_values[last],
            self.y_values[last - 1],
            self.y_values[last],
        )
    }

    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedError> {
        if floor_index + 1 >= self.x_values.len() {
            return Err(TabulatedError::IndexOutOfBounds {
                index: floor_index,
                count: self.x_values.len(),
            });
        }
        let (left_x, right_x) = (self.x_values[floor_index], self.x_values[floor_index + 1]);
        if x < left_x || x > right_x {
            return Err(TabulatedError::Domain {
                x,
                left: left_x,
                right: right_x,
            });
        }
        Ok(interpolate_linear(
            x,
            left_x,
            right_x,
            self.y_values[floor_index],
            self.y_values[floor_index + 1],
        ))
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(
            self.x_values
                .iter()
                .zip(self.y_values.iter())
                .map(|(&x, &y)| Point::new(x, y)),
        )
    }
}

impl Insertable for ArrayTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) {
        if let Some(index) = self.index_of_x(x) {
            self.y_values[index] = y;
            trace!(x, y, index, "overwrote existing sample");
            return;
        }
        let slot = self.x_values.partition_point(|&value| value < x);
        self.x_values.insert(slot, x);
        self.y_values.insert(slot, y);
        trace!(x, y, slot, count = self.x_values.len(), "inserted sample");
    }
}

impl Removable for ArrayTabulatedFunction {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedError> {
        let count = self.x_values.len();
        if count <= MIN_COUNT {
            return Err(TabulatedError::InsufficientData {
                got: count - 1,
                need: MIN_COUNT,
            });
        }
        self.check_index(index)?;
        self.x_values.remove(index);
        self.y_values.remove(index);
        trace!(index, count = count - 1, "removed sample");
        Ok(())
    }
}

impl Hash for ArrayTabulatedFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x_values.len().hash(state);
        for (x, y) in self.x_values.iter().zip(self.y_values.iter()) {
            hash_bits(*x).hash(state);
            hash_bits(*y).hash(state);
        }
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, "ArrayTabulatedFunction", f)
    }
}
