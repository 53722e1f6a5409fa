//! Capability traits.
//!
//! This module defines the abstractions every function type builds on:
//! - Evaluation and composition (`MathFunction` trait)
//! - Sampled access and the shared evaluation algorithm (`TabulatedFunction` trait)
//! - Structural mutation (`Insertable`, `Removable` traits)
//!
//! Storage-independent helpers (validators, linear interpolation, rendering)
//! live next to the traits in [`tabulated`].

pub mod math_function;
pub mod tabulated;

pub use math_function::MathFunction;
pub use tabulated::{
    check_count, check_length_is_the_same, check_sorted, interpolate_linear, Insertable,
    Removable, TabulatedFunction, MIN_COUNT,
};
