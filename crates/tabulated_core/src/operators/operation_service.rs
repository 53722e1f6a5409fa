//! Pointwise arithmetic on tabulated functions sharing one x-grid.

use tracing::debug;

use crate::factory::{ArrayTabulatedFunctionFactory, TabulatedFunctionFactory};
use crate::functions::TabulatedFunctionEnum;
use crate::traits::TabulatedFunction;
use crate::types::{Point, TabulatedError};

/// Snapshot the samples of any tabulated function.
pub fn as_points<F>(function: &F) -> Vec<Point>
where
    F: TabulatedFunction + ?Sized,
{
    function.to_points()
}

/// Adds, subtracts, multiplies and divides tabulated functions sample by
/// sample.
///
/// Both operands must have the same count and identical x at every index.
/// Division follows IEEE-754: a zero divisor yields an infinity or NaN.
///
/// # Example
///
/// ```
/// use tabulated_core::functions::{ArrayTabulatedFunction, LinkedListTabulatedFunction};
/// use tabulated_core::operators::TabulatedFunctionOperationService;
/// use tabulated_core::traits::TabulatedFunction;
///
/// let a = ArrayTabulatedFunction::new(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
/// let b = LinkedListTabulatedFunction::new(&[0.0, 1.0], &[3.0, 4.0]).unwrap();
/// let sum = TabulatedFunctionOperationService::default().add(&a, &b).unwrap();
/// assert_eq!(sum.get_y(1).unwrap(), 6.0);
/// ```
pub struct TabulatedFunctionOperationService {
    factory: Box<dyn TabulatedFunctionFactory>,
}

impl TabulatedFunctionOperationService {
    /// Service producing results through `factory`.
    pub fn new(factory: Box<dyn TabulatedFunctionFactory>) -> Self {
        Self { factory }
    }

    /// Factory used for results.
    pub fn factory(&self) -> &dyn TabulatedFunctionFactory {
        self.factory.as_ref()
    }

    /// Replace the result factory.
    pub fn set_factory(&mut self, factory: Box<dyn TabulatedFunctionFactory>) {
        self.factory = factory;
    }

    /// `a + b`
    pub fn add<A, B>(&self, a: &A, b: &B) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |l, r| l + r)
    }

    /// `a - b`
    pub fn subtract<A, B>(&self, a: &A, b: &B) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |l, r| l - r)
    }

    /// `a * b`
    pub fn multiply<A, B>(&self, a: &A, b: &B) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |l, r| l * r)
    }

    /// `a / b`
    pub fn divide<A, B>(&self, a: &A, b: &B) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        self.combine(a, b, |l, r| l / r)
    }

    fn combine<A, B>(
        &self,
        a: &A,
        b: &B,
        operation: impl Fn(f64, f64) -> f64,
    ) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        A: TabulatedFunction + ?Sized,
        B: TabulatedFunction + ?Sized,
    {
        let left = as_points(a);
        let right = as_points(b);
        if left.len() != right.len() {
            return Err(TabulatedError::LengthMismatch {
                x_len: left.len(),
                y_len: right.len(),
            });
        }
        let mut x_values = Vec::with_capacity(left.len());
        let mut y_values = Vec::with_capacity(left.len());
        for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            if l.x != r.x {
                return Err(TabulatedError::InconsistentFunctions {
                    index,
                    left: l.x,
                    right: r.x,
                });
            }
            x_values.push(l.x);
            y_values.push(operation(l.y, r.y));
        }
        debug!(count = x_values.len(), "combined tabulated functions");
        self.factory.create(&x_values, &y_values)
    }
}

impl Default for TabulatedFunctionOperationService {
    fn default() -> Self {
        Self::new(Box::new(ArrayTabulatedFunctionFactory))
    }
}

impl std::fmt::Debug for TabulatedFunctionOperationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabulatedFunctionOperationService")
            .field("factory", &self.factory.kind())
            .finish()
    }
}
