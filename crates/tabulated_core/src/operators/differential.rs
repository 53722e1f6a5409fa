//! Finite-difference derivative of a tabulated function over its own grid.

use tracing::debug;

use crate::concurrent::SynchronizedTabulatedFunction;
use crate::factory::{ArrayTabulatedFunctionFactory, TabulatedFunctionFactory};
use crate::functions::TabulatedFunctionEnum;
use crate::traits::TabulatedFunction;
use crate::types::{Point, TabulatedError};

/// Discrete derivative on the input's x-grid.
///
/// For samples `(x_i, y_i)`, `i = 0..n`:
///
/// - `i = 0`: forward difference `(y_1 - y_0) / (x_1 - x_0)`
/// - `i = n - 1`: backward difference `(y_{n-1} - y_{n-2}) / (x_{n-1} - x_{n-2})`
/// - otherwise: central difference `(y_{i+1} - y_{i-1}) / (x_{i+1} - x_{i-1})`
///
/// The storage of the result is chosen by the injected factory (array by
/// default).
///
/// # Example
///
/// ```
/// use tabulated_core::functions::ArrayTabulatedFunction;
/// use tabulated_core::operators::TabulatedDifferentialOperator;
/// use tabulated_core::traits::TabulatedFunction;
///
/// let f = ArrayTabulatedFunction::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
/// let df = TabulatedDifferentialOperator::default().derive(&f).unwrap();
/// let ys: Vec<f64> = df.points().map(|p| p.y).collect();
/// assert_eq!(ys, vec![1.0, 2.0, 4.0, 5.0]);
/// ```
pub struct TabulatedDifferentialOperator {
    factory: Box<dyn TabulatedFunctionFactory>,
}

impl TabulatedDifferentialOperator {
    /// Operator producing results through `factory`.
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

    /// Derivative of `function` sampled on the same x values.
    pub fn derive<F>(&self, function: &F) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        F: TabulatedFunction + ?Sized,
    {
        let points = function.to_points();
        let (x_values, y_values) = differences(&points);
        debug!(count = points.len(), kind = %self.factory.kind(), "derived tabulated function");
        self.factory.create(&x_values, &y_values)
    }

    /// Derivative computed while holding the decorator's lock for the whole
    /// read, so no writer can interleave.
    pub fn derive_synchronously<F>(
        &self,
        function: &SynchronizedTabulatedFunction<F>,
    ) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        F: TabulatedFunction,
    {
        function.run_atomically(|inner| self.derive(inner))
    }

    /// Wrap `function` in a fresh decorator, then derive it synchronously.
    pub fn derive_synchronously_owned<F>(&self, function: F) -> Result<TabulatedFunctionEnum, TabulatedError>
    where
        F: TabulatedFunction,
    {
        self.derive_synchronously(&SynchronizedTabulatedFunction::new(function))
    }
}

impl Default for TabulatedDifferentialOperator {
    fn default() -> Self {
        Self::new(Box::new(ArrayTabulatedFunctionFactory))
    }
}

impl std::fmt::Debug for TabulatedDifferentialOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabulatedDifferentialOperator")
            .field("factory", &self.factory.kind())
            .finish()
    }
}

/// Grid and difference quotients; `points` holds at least two samples.
fn differences(points: &[Point]) -> (Vec<f64>, Vec<f64>) {
    let n = points.len();
    let x_values = points.iter().map(|p| p.x).collect();
    let y_values = (0..n)
        .map(|i| {
            let (left, right) = if i == 0 {
                (points[0], points[1])
            } else if i == n - 1 {
                (points[n - 2], points[n - 1])
            } else {
                (points[i - 1], points[i + 1])
            };
            left.slope(&right)
        })
        .collect();
    (x_values, y_values)
}
