//! The evaluable capability shared by every function in the crate.

use std::sync::Arc;

use crate::functions::CompositeFunction;

/// A real function of one real variable.
///
/// Implemented by the analytic helpers in [`crate::functions::simple`], by
/// both tabulated storages, by their enum wrapper and by the synchronising
/// decorator, so any of them can be sampled, composed or differentiated.
///
/// # Example
///
/// ```
/// use tabulated_core::functions::{IdentityFunction, SqrFunction};
/// use tabulated_core::traits::MathFunction;
///
/// let f = IdentityFunction.and_then(SqrFunction);
/// assert_eq!(f.apply(3.0), 9.0);
/// ```
pub trait MathFunction {
    /// Evaluate the function at `x`.
    fn apply(&self, x: f64) -> f64;

    /// Compose: the returned function computes `after(self(x))`.
    fn and_then<G>(self, after: G) -> CompositeFunction<Self, G>
    where
        Self: Sized,
        G: MathFunction,
    {
        CompositeFunction::new(self, after)
    }
}

impl<F: MathFunction + ?Sized> MathFunction for &F {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

impl<F: MathFunction + ?Sized> MathFunction for Box<F> {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

impl<F: MathFunction + ?Sized> MathFunction for Arc<F> {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        (**self).apply(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Affine {
        slope: f64,
        intercept: f64,
    }

    impl MathFunction for Affine {
        fn apply(&self, x: f64) -> f64 {
            self.slope * x + self.intercept
        }
    }

    #[test]
    fn test_reference_and_box_forwarding() {
        let f = Affine {
            slope: 2.0,
            intercept: 1.0,
        };
        assert_eq!((&f).apply(1.0), 3.0);

        let boxed: Box<dyn MathFunction> = Box::new(f);
        assert_eq!(boxed.apply(2.0), 5.0);
    }

    #[test]
    fn test_and_then_order() {
        let double = Affine {
            slope: 2.0,
            intercept: 0.0,
        };
        let shift = Affine {
            slope: 1.0,
            intercept: 3.0,
        };
        // shift(double(x))
        let f = double.and_then(shift);
        assert_eq!(f.apply(1.0), 5.0);
    }
}
