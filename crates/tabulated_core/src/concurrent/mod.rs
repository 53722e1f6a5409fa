//! Thread-safe access to tabulated functions.
//!
//! Plain storages mutate through `&mut self` and cannot be shared across
//! threads without a wrapper. [`SynchronizedTabulatedFunction`] owns one
//! delegate and the only lock guarding it; [`tasks`] holds the worker tasks
//! that exercise it.

pub mod synchronized;
pub mod tasks;

pub use synchronized::SynchronizedTabulatedFunction;
pub use tasks::{run_doubling_harness, Discipline, MultiplyingTask, ReadTask, WriteTask};
