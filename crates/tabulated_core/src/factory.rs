//! Factories choosing the storage representation of produced functions.
//!
//! Operators that build new tabulated functions (derivatives, pointwise
//! arithmetic, readers) take a factory so the caller decides between array
//! and linked-ring storage. [`StorageKind`] is the runtime selector used by
//! configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::functions::{ArrayTabulatedFunction, LinkedListTabulatedFunction, TabulatedFunctionEnum};
use crate::traits::MathFunction;
use crate::types::TabulatedError;

/// Creates tabulated functions in one storage representation.
pub trait TabulatedFunctionFactory: Send + Sync {
    /// Build from sample arrays, with the constructor's validation.
    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<TabulatedFunctionEnum, TabulatedError>;

    /// Sample `source` uniformly over `[from, to]`.
    fn create_from_function(
        &self,
        source: &dyn MathFunction,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<TabulatedFunctionEnum, TabulatedError>;

    /// Representation this factory produces.
    fn kind(&self) -> StorageKind;
}

/// Produces [`ArrayTabulatedFunction`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayTabulatedFunctionFactory;

impl TabulatedFunctionFactory for ArrayTabulatedFunctionFactory {
    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<TabulatedFunctionEnum, TabulatedError> {
        ArrayTabulatedFunction::new(x_values, y_values).map(TabulatedFunctionEnum::Array)
    }

    fn create_from_function(
        &self,
        source: &dyn MathFunction,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<TabulatedFunctionEnum, TabulatedError> {
        ArrayTabulatedFunction::from_function(source, from, to, count).map(TabulatedFunctionEnum::Array)
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Array
    }
}

/// Produces [`LinkedListTabulatedFunction`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkedListTabulatedFunctionFactory;

impl TabulatedFunctionFactory for LinkedListTabulatedFunctionFactory {
    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<TabulatedFunctionEnum, TabulatedError> {
        LinkedListTabulatedFunction::new(x_values, y_values).map(TabulatedFunctionEnum::LinkedList)
    }

    fn create_from_function(
        &self,
        source: &dyn MathFunction,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<TabulatedFunctionEnum, TabulatedError> {
        LinkedListTabulatedFunction::from_function(source, from, to, count)
            .map(TabulatedFunctionEnum::LinkedList)
    }

    fn kind(&self) -> StorageKind {
        StorageKind::LinkedList
    }
}

/// Storage representation selector.
///
/// Deserializes from `"array"` / `"linked_list"`, and parses from the same
/// strings (plus `"linked"` and `"list"`) for command-line use.
///
/// # Example
///
/// ```
/// use tabulated_core::factory::{StorageKind, TabulatedFunctionFactory};
/// use tabulated_core::traits::TabulatedFunction;
///
/// let kind: StorageKind = "linked_list".parse().unwrap();
/// let f = kind.create(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
/// assert_eq!(f.kind(), kind);
/// assert_eq!(f.count(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Contiguous arrays
    #[default]
    Array,
    /// Circular linked ring
    LinkedList,
}

impl StorageKind {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Array => "array",
            StorageKind::LinkedList => "linked_list",
        }
    }

    /// Boxed factory for this representation.
    pub fn factory(self) -> Box<dyn TabulatedFunctionFactory> {
        match self {
            StorageKind::Array => Box::new(ArrayTabulatedFunctionFactory),
            StorageKind::LinkedList => Box::new(LinkedListTabulatedFunctionFactory),
        }
    }
}

impl TabulatedFunctionFactory for StorageKind {
    fn create(&self, x_values: &[f64], y_values: &[f64]) -> Result<TabulatedFunctionEnum, TabulatedError> {
        match self {
            StorageKind::Array => ArrayTabulatedFunctionFactory.create(x_values, y_values),
            StorageKind::LinkedList => LinkedListTabulatedFunctionFactory.create(x_values, y_values),
        }
    }

    fn create_from_function(
        &self,
        source: &dyn MathFunction,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<TabulatedFunctionEnum, TabulatedError> {
        match self {
            StorageKind::Array => {
                ArrayTabulatedFunctionFactory.create_from_function(source, from, to, count)
            }
            StorageKind::LinkedList => {
                LinkedListTabulatedFunctionFactory.create_from_function(source, from, to, count)
            }
        }
    }

    fn kind(&self) -> StorageKind {
        *self
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised storage name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage kind '{0}' (expected 'array' or 'linked_list')")]
pub struct ParseStorageKindError(pub String);

impl FromStr for StorageKind {
    type Err = ParseStorageKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(StorageKind::Array),
            "linked_list" | "linked-list" | "linked" | "list" => Ok(StorageKind::LinkedList),
            other => Err(ParseStorageKindError(other.to_string())),
        }
    }
}
