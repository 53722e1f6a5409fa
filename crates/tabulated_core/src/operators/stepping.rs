//! Numeric differentiation of arbitrary functions with a fixed step.

use serde::{Deserialize, Serialize};

use crate::traits::MathFunction;
use crate::types::TabulatedError;

/// Difference quotient used by [`SteppingDifferentialOperator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteppingScheme {
    /// `(f(x) - f(x - h)) / h`
    Left,
    /// `(f(x + h) - f(x - h)) / 2h`
    #[default]
    Middle,
    /// `(f(x + h) - f(x)) / h`
    Right,
}

/// Differentiates any [`MathFunction`] with a step `h`.
///
/// # Example
///
/// ```
/// use tabulated_core::functions::SqrFunction;
/// use tabulated_core::operators::{SteppingDifferentialOperator, SteppingScheme};
/// use tabulated_core::traits::MathFunction;
///
/// let op = SteppingDifferentialOperator::new(SteppingScheme::Middle, 1e-3).unwrap();
/// let df = op.derive(SqrFunction);
/// assert!((df.apply(3.0) - 6.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDifferentialOperator {
    scheme: SteppingScheme,
    step: f64,
}

impl SteppingDifferentialOperator {
    /// Operator with the given scheme and step.
    ///
    /// # Errors
    ///
    /// `InvalidStep` unless `step` is finite and strictly positive.
    pub fn new(scheme: SteppingScheme, step: f64) -> Result<Self, TabulatedError> {
        check_step(step)?;
        Ok(Self { scheme, step })
    }

    /// Difference scheme.
    pub fn scheme(&self) -> SteppingScheme {
        self.scheme
    }

    /// Step `h`.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Change the step; rejected values leave the operator unchanged.
    pub fn set_step(&mut self, step: f64) -> Result<(), TabulatedError> {
        check_step(step)?;
        self.step = step;
        Ok(())
    }

    /// Derivative of `function` as a new function.
    pub fn derive<F: MathFunction>(&self, function: F) -> SteppingDerivative<F> {
        SteppingDerivative {
            function,
            scheme: self.scheme,
            step: self.step,
        }
    }
}

fn check_step(step: f64) -> Result<(), TabulatedError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(TabulatedError::InvalidStep { step });
    }
    Ok(())
}

/// Result of [`SteppingDifferentialOperator::derive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDerivative<F> {
    function: F,
    scheme: SteppingScheme,
    step: f64,
}

impl<F: MathFunction> MathFunction for SteppingDerivative<F> {
    fn apply(&self, x: f64) -> f64 {
        let h = self.step;
        let f = &self.function;
        match self.scheme {
            SteppingScheme::Left => (f.apply(x) - f.apply(x - h)) / h,
            SteppingScheme::Middle => (f.apply(x + h) - f.apply(x - h)) / (2.0 * h),
            SteppingScheme::Right => (f.apply(x + h) - f.apply(x)) / h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{ArrayTabulatedFunction, SqrFunction};
    use approx::assert_relative_eq;

    #[test]
    fn test_schemes_on_square() {
        let h = 1e-4;
        for (scheme, bias) in [
            (SteppingScheme::Left, -h),
            (SteppingScheme::Middle, 0.0),
            (SteppingScheme::Right, h),
        ] {
            let df = SteppingDifferentialOperator::new(scheme, h).unwrap().derive(SqrFunction);
            // exact quotient of x² is 2x plus the one-sided bias h or -h
            assert_relative_eq!(df.apply(2.0), 4.0 + bias, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_invalid_step_rejected() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SteppingDifferentialOperator::new(SteppingScheme::Left, step),
                Err(TabulatedError::InvalidStep { .. })
            ));
        }
        let mut op = SteppingDifferentialOperator::new(SteppingScheme::Right, 0.5).unwrap();
        assert!(op.set_step(-0.1).is_err());
        assert_eq!(op.step(), 0.5);
        op.set_step(0.25).unwrap();
        assert_eq!(op.step(), 0.25);
        assert_eq!(op.scheme(), SteppingScheme::Right);
    }

    #[test]
    fn test_derive_tabulated_by_reference() {
        let table = ArrayTabulatedFunction::new(&[0.0, 10.0], &[0.0, 30.0]).unwrap();
        let df = SteppingDifferentialOperator::new(SteppingScheme::Middle, 0.1)
            .unwrap()
            .derive(&table);
        assert_relative_eq!(df.apply(5.0), 3.0, epsilon = 1e-12);
    }
}
