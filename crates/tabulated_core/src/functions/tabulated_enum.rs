//! Static dispatch over the two storage variants.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ArrayTabulatedFunction, LinkedListTabulatedFunction};
use crate::factory::StorageKind;
use crate::traits::{Insertable, MathFunction, Removable, TabulatedFunction};
use crate::types::{Point, TabulatedError};

/// Either tabulated storage behind one concrete type.
///
/// Factories return this enum so callers can pick the storage at runtime
/// without boxing. Every capability forwards to the wrapped variant.
///
/// # Example
///
/// ```
/// use tabulated_core::functions::{ArrayTabulatedFunction, TabulatedFunctionEnum};
/// use tabulated_core::traits::MathFunction;
///
/// let f = TabulatedFunctionEnum::Array(
///     ArrayTabulatedFunction::new(&[0.0, 1.0], &[0.0, 2.0]).unwrap(),
/// );
/// assert_eq!(f.apply(0.5), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub enum TabulatedFunctionEnum {
    /// Contiguous array storage
    Array(ArrayTabulatedFunction),
    /// Circular linked-ring storage
    LinkedList(LinkedListTabulatedFunction),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            TabulatedFunctionEnum::Array($f) => $body,
            TabulatedFunctionEnum::LinkedList($f) => $body,
        }
    };
}

impl TabulatedFunctionEnum {
    /// Storage kind of the wrapped variant.
    pub fn kind(&self) -> StorageKind {
        match self {
            TabulatedFunctionEnum::Array(_) => StorageKind::Array,
            TabulatedFunctionEnum::LinkedList(_) => StorageKind::LinkedList,
        }
    }
}

impl From<ArrayTabulatedFunction> for TabulatedFunctionEnum {
    fn from(function: ArrayTabulatedFunction) -> Self {
        TabulatedFunctionEnum::Array(function)
    }
}

impl From<LinkedListTabulatedFunction> for TabulatedFunctionEnum {
    fn from(function: LinkedListTabulatedFunction) -> Self {
        TabulatedFunctionEnum::LinkedList(function)
    }
}

impl MathFunction for TabulatedFunctionEnum {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        dispatch!(self, f => f.apply(x))
    }
}

impl TabulatedFunction for TabulatedFunctionEnum {
    fn count(&self) -> usize {
        dispatch!(self, f => f.count())
    }

    fn get_x(&self, index: usize) -> Result<f64, TabulatedError> {
        dispatch!(self, f => f.get_x(index))
    }

    fn get_y(&self, index: usize) -> Result<f64, TabulatedError> {
        dispatch!(self, f => f.get_y(index))
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedError> {
        dispatch!(self, f => f.set_y(index, value))
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        dispatch!(self, f => f.index_of_x(x))
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        dispatch!(self, f => f.index_of_y(y))
    }

    fn left_bound(&self) -> f64 {
        dispatch!(self, f => f.left_bound())
    }

    fn right_bound(&self) -> f64 {
        dispatch!(self, f => f.right_bound())
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedError> {
        dispatch!(self, f => f.floor_index_of_x(x))
    }

    fn extrapolate_left(&self, x: f64) -> f64 {
        dispatch!(self, f => f.extrapolate_left(x))
    }

    fn extrapolate_right(&self, x: f64) -> f64 {
        dispatch!(self, f => f.extrapolate_right(x))
    }

    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedError> {
        dispatch!(self, f => f.interpolate(x, floor_index))
    }

    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        dispatch!(self, f => f.points())
    }
}

impl Insertable for TabulatedFunctionEnum {
    fn insert(&mut self, x: f64, y: f64) {
        dispatch!(self, f => f.insert(x, y))
    }
}

impl Removable for TabulatedFunctionEnum {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedError> {
        dispatch!(self, f => f.remove(index))
    }
}

impl fmt::Display for TabulatedFunctionEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, inner => fmt::Display::fmt(inner, f))
    }
}
