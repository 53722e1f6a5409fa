//! Core value and error types.
//!
//! This module provides:
//! - `point`: The immutable `(x, y)` sample handed out by iteration
//! - `error`: Structured error types for tabulated functions and their serialised forms
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Point`] from `point`
//! - [`TabulatedError`], [`FormatError`] from `error`

pub mod error;
pub mod point;

// Re-export commonly used types at module level
pub use error::{FormatError, TabulatedError};
pub use point::Point;
