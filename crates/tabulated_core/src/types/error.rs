//! Error types for structured error handling.
//!
//! This module provides:
//! - `TabulatedError`: Errors from construction, access and mutation of tabulated functions
//! - `FormatError`: Errors from reading serialised tabulated functions

use thiserror::Error;

/// Tabulated function errors.
///
/// Provides structured error handling for the sample-set operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `LengthMismatch`: x and y arrays of different lengths
/// - `NotSorted`: x values not in non-decreasing order
/// - `InsufficientData`: Fewer than two samples at construction, or a removal
///   that would leave fewer than two
/// - `IndexOutOfBounds`: Accessor index outside `[0, count)`
/// - `Domain`: Interpolation requested outside the straddling interval
/// - `InconsistentFunctions`: Two functions sampled on different x-grids
/// - `InvalidStep`: Non-positive or non-finite differentiation step
///
/// # Examples
/// ```
/// use tabulated_core::types::TabulatedError;
///
/// let err = TabulatedError::LengthMismatch { x_len: 3, y_len: 2 };
/// assert_eq!(format!("{}", err), "Length mismatch: 3 x values, 2 y values");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabulatedError {
    /// x and y arrays have different lengths.
    #[error("Length mismatch: {x_len} x values, {y_len} y values")]
    LengthMismatch {
        /// Number of x values
        x_len: usize,
        /// Number of y values
        y_len: usize,
    },

    /// x values are not in non-decreasing order.
    #[error("x values are not sorted at index {index}")]
    NotSorted {
        /// First index whose value is smaller than its predecessor
        index: usize,
    },

    /// Fewer samples than the minimum a tabulated function keeps.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of samples present (or that would remain)
        got: usize,
        /// Minimum number of samples required
        need: usize,
    },

    /// Accessor index outside the sample range.
    #[error("Index {index} out of bounds for {count} samples")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of samples
        count: usize,
    },

    /// Query point outside the interval of the supplied floor index.
    #[error("Query point {x} outside interval [{left}, {right}]")]
    Domain {
        /// The query point
        x: f64,
        /// Left end of the expected interval
        left: f64,
        /// Right end of the expected interval
        right: f64,
    },

    /// Functions sampled on different x-grids.
    #[error("Inconsistent functions: x values differ at index {index} ({left} vs {right})")]
    InconsistentFunctions {
        /// First index where the grids differ
        index: usize,
        /// x value of the first function
        left: f64,
        /// x value of the second function
        right: f64,
    },

    /// Differentiation step is not a positive finite number.
    #[error("Invalid step: {step}")]
    InvalidStep {
        /// The rejected step
        step: f64,
    },
}

impl TabulatedError {
    /// Returns true for the validation family of errors (bad construction
    /// input or a refused removal).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TabulatedError::LengthMismatch { .. }
                | TabulatedError::NotSorted { .. }
                | TabulatedError::InsufficientData { .. }
        )
    }
}

/// Errors from reading or writing serialised tabulated functions.
///
/// # Examples
/// ```
/// use tabulated_core::types::FormatError;
///
/// let err = FormatError::InvalidNumber { line: 2, token: "abc".to_string() };
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Error, Debug)]
pub enum FormatError {
    /// Underlying stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream ended before the count line.
    #[error("Missing count line")]
    MissingCount,

    /// Count line is not a valid sample count.
    #[error("Invalid count: {0}")]
    InvalidCount(String),

    /// A point line did not hold exactly two tokens.
    #[error("Line {line}: expected 2 tokens, found {found}")]
    WrongTokenCount {
        /// 1-based line number
        line: usize,
        /// Number of tokens found
        found: usize,
    },

    /// A token could not be parsed as a number.
    #[error("Line {line}: invalid number '{token}'")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },

    /// Stream ended before all announced points were read.
    #[error("Truncated input: expected {expected} points, read {read}")]
    Truncated {
        /// Announced number of points
        expected: usize,
        /// Number of points actually read
        read: usize,
    },

    /// Opaque (JSON) payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload decoded but the samples violate a function invariant.
    #[error("Invalid samples: {0}")]
    Invalid(#[from] TabulatedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = TabulatedError::LengthMismatch { x_len: 4, y_len: 3 };
        assert_eq!(format!("{}", err), "Length mismatch: 4 x values, 3 y values");
    }

    #[test]
    fn test_not_sorted_display() {
        let err = TabulatedError::NotSorted { index: 2 };
        assert_eq!(format!("{}", err), "x values are not sorted at index 2");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = TabulatedError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            format!("{}", err),
            "Insufficient data points: got 1, need at least 2"
        );
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let err = TabulatedError::IndexOutOfBounds { index: 5, count: 3 };
        assert_eq!(format!("{}", err), "Index 5 out of bounds for 3 samples");
    }

    #[test]
    fn test_domain_display() {
        let err = TabulatedError::Domain {
            x: 5.0,
            left: 0.0,
            right: 1.0,
        };
        assert_eq!(format!("{}", err), "Query point 5 outside interval [0, 1]");
    }

    #[test]
    fn test_is_validation() {
        assert!(TabulatedError::NotSorted { index: 1 }.is_validation());
        assert!(TabulatedError::InsufficientData { got: 2, need: 2 }.is_validation());
        assert!(!TabulatedError::IndexOutOfBounds { index: 0, count: 0 }.is_validation());
        assert!(!TabulatedError::InvalidStep { step: 0.0 }.is_validation());
    }

    #[test]
    fn test_format_error_from_tabulated() {
        let err: FormatError = TabulatedError::NotSorted { index: 1 }.into();
        match err {
            FormatError::Invalid(TabulatedError::NotSorted { index }) => assert_eq!(index, 1),
            other => panic!("Expected Invalid variant, got {:?}", other),
        }
    }

    #[test]
    fn test_format_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: FormatError = io.into();
        assert!(format!("{}", err).starts_with("I/O error"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = TabulatedError::InvalidStep { step: -1.0 };
        let _: &dyn std::error::Error = &err;
        let err = FormatError::MissingCount;
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = TabulatedError::IndexOutOfBounds { index: 3, count: 2 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
