//! Operators producing new functions from existing ones.
//!
//! - `differential`: finite differences over a tabulated grid
//! - `stepping`: fixed-step numeric derivative of any function
//! - `operation_service`: pointwise arithmetic of two tabulated functions

pub mod differential;
pub mod operation_service;
pub mod stepping;

pub use differential::TabulatedDifferentialOperator;
pub use operation_service::{as_points, TabulatedFunctionOperationService};
pub use stepping::{SteppingDerivative, SteppingDifferentialOperator, SteppingScheme};
