//! Analytic functions used as sampling sources and composition building blocks.

use serde::{Deserialize, Serialize};

use crate::traits::MathFunction;

/// `f(x) = x`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityFunction;

impl MathFunction for IdentityFunction {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x
    }
}

/// `f(x) = x²`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqrFunction;

impl MathFunction for SqrFunction {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x * x
    }
}

/// `f(x) = c` for a fixed `c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantFunction {
    value: f64,
}

impl ConstantFunction {
    /// Constant function returning `value` everywhere.
    #[inline]
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// The returned constant.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl MathFunction for ConstantFunction {
    #[inline]
    fn apply(&self, _x: f64) -> f64 {
        self.value
    }
}

/// `f(x) = 0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZeroFunction;

impl MathFunction for ZeroFunction {
    #[inline]
    fn apply(&self, _x: f64) -> f64 {
        0.0
    }
}

impl From<ZeroFunction> for ConstantFunction {
    fn from(_: ZeroFunction) -> Self {
        ConstantFunction::new(0.0)
    }
}

/// `f(x) = 1`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitFunction;

impl MathFunction for UnitFunction {
    #[inline]
    fn apply(&self, _x: f64) -> f64 {
        1.0
    }
}

impl From<UnitFunction> for ConstantFunction {
    fn from(_: UnitFunction) -> Self {
        ConstantFunction::new(1.0)
    }
}
