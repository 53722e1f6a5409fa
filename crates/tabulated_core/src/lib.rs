//! # tabulated_core: Tabulated Function Engine
//!
//! Represents a real function of one variable by a finite ordered sample of
//! `(x, y)` points, with piecewise-linear evaluation between samples and
//! linear extrapolation beyond them.
//!
//! ## Components
//!
//! - Capabilities: `MathFunction`, `TabulatedFunction`, `Insertable`,
//!   `Removable` (`traits`)
//! - Storages: array-backed and circular linked-ring tabulated functions,
//!   analytic helpers and composition (`functions`)
//! - Storage selection at runtime (`factory`)
//! - Finite-difference and stepping derivatives, pointwise arithmetic
//!   (`operators`)
//! - Mutex-owning decorator and worker tasks for shared use (`concurrent`)
//! - Text, binary and serde serialization (`io`)
//! - Value and error types: `Point`, `TabulatedError`, `FormatError` (`types`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use tabulated_core::factory::{StorageKind, TabulatedFunctionFactory};
//! use tabulated_core::functions::SqrFunction;
//! use tabulated_core::operators::TabulatedDifferentialOperator;
//! use tabulated_core::traits::{Insertable, MathFunction, TabulatedFunction};
//!
//! // Sample x² on [0, 3] with four points, stored as a linked ring
//! let mut f = StorageKind::LinkedList
//!     .create_from_function(&SqrFunction, 0.0, 3.0, 4)
//!     .unwrap();
//! assert_eq!(f.apply(1.5), 2.5);
//! assert_eq!(f.apply(4.0), 14.0);
//!
//! f.insert(1.5, 2.25);
//! assert_eq!(f.count(), 5);
//!
//! let df = TabulatedDifferentialOperator::default().derive(&f).unwrap();
//! assert_eq!(df.count(), 5);
//! ```
//!
//! ## Concurrency
//!
//! Storages mutate through `&mut self`; share one across threads by
//! wrapping it in `concurrent::SynchronizedTabulatedFunction` and use
//! `run_atomically` for compound updates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod concurrent;
pub mod factory;
pub mod functions;
pub mod io;
pub mod operators;
pub mod traits;
pub mod types;
