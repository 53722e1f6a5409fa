//! Function implementations.
//!
//! - Analytic helpers (`simple`) and composition (`composite`)
//! - Tabulated storages: contiguous arrays (`array`) and a circular
//!   linked ring (`linked_list`)
//! - `TabulatedFunctionEnum` for static dispatch over the two storages

pub mod array;
pub mod composite;
pub mod linked_list;
pub mod simple;
pub mod tabulated_enum;

pub use array::ArrayTabulatedFunction;
pub use composite::CompositeFunction;
pub use linked_list::LinkedListTabulatedFunction;
pub use simple::{ConstantFunction, IdentityFunction, SqrFunction, UnitFunction, ZeroFunction};
pub use tabulated_enum::TabulatedFunctionEnum;
