//! Function composition.

use crate::traits::MathFunction;

/// `x ↦ second(first(x))`
///
/// Usually built through [`MathFunction::and_then`]. Composites nest, so
/// `f.and_then(g).and_then(h)` computes `h(g(f(x)))`.
///
/// # Example
///
/// ```
/// use tabulated_core::functions::{CompositeFunction, ConstantFunction, SqrFunction};
/// use tabulated_core::traits::MathFunction;
///
/// let f = CompositeFunction::new(ConstantFunction::new(3.0), SqrFunction);
/// assert_eq!(f.apply(100.0), 9.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeFunction<F, G> {
    first: F,
    second: G,
}

impl<F, G> CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    /// Compose `first` then `second`.
    pub fn new(first: F, second: G) -> Self {
        Self { first, second }
    }

    /// Inner function.
    pub fn first(&self) -> &F {
        &self.first
    }

    /// Outer function.
    pub fn second(&self) -> &G {
        &self.second
    }
}

impl<F, G> MathFunction for CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        self.second.apply(self.first.apply(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{ArrayTabulatedFunction, IdentityFunction, SqrFunction};

    #[test]
    fn test_nested_composition() {
        // ((x²)²)²
        let f = SqrFunction.and_then(SqrFunction).and_then(SqrFunction);
        assert_eq!(f.apply(2.0), 256.0);
    }

    #[test]
    fn test_compose_with_tabulated() {
        let table = ArrayTabulatedFunction::new(&[0.0, 10.0], &[0.0, 20.0]).unwrap();
        let f = IdentityFunction.and_then(SqrFunction).and_then(&table);
        assert_eq!(f.apply(2.0), 8.0);
        assert_eq!(f.first().first(), &IdentityFunction);
    }
}
