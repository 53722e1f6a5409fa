//! Worker tasks over a shared synchronized function.
//!
//! Each task holds an `Arc` to the same [`SynchronizedTabulatedFunction`];
//! that decorator is the only lock owner for the shared instance.

use std::panic;
use std::sync::Arc;
use std::thread;

use tracing::{debug, info};

use super::SynchronizedTabulatedFunction;
use crate::traits::TabulatedFunction;
use crate::types::{Point, TabulatedError};

/// Locking discipline for read-modify-write tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Discipline {
    /// The whole pass runs inside one `run_atomically` closure.
    #[default]
    Atomic,
    /// Each `get_y`/`set_y` takes the lock separately; concurrent passes can
    /// lose updates.
    PerCall,
}

/// Doubles every y value of the shared function.
#[derive(Debug)]
pub struct MultiplyingTask<F> {
    function: Arc<SynchronizedTabulatedFunction<F>>,
    discipline: Discipline,
}

impl<F: TabulatedFunction> MultiplyingTask<F> {
    /// Atomic doubling task.
    pub fn new(function: Arc<SynchronizedTabulatedFunction<F>>) -> Self {
        Self::with_discipline(function, Discipline::Atomic)
    }

    /// Doubling task with an explicit discipline.
    pub fn with_discipline(function: Arc<SynchronizedTabulatedFunction<F>>, discipline: Discipline) -> Self {
        Self { function, discipline }
    }

    /// One pass over all samples.
    pub fn run(&self) -> Result<(), TabulatedError> {
        let result: Result<(), TabulatedError> = match self.discipline {
            Discipline::Atomic => self.function.run_atomically(|f| {
                for i in 0..f.count() {
                    let y = f.get_y(i)?;
                    f.set_y(i, y * 2.0)?;
                }
                Ok::<(), TabulatedError>(())
            }),
            Discipline::PerCall => {
                for i in 0..self.function.count() {
                    let y = self.function.get_y(i)?;
                    thread::yield_now();
                    self.function.set_y(i, y * 2.0)?;
                }
                Ok(())
            }
        };
        result?;
        debug!(discipline = ?self.discipline, "multiplying task finished");
        Ok(())
    }
}

/// Overwrites every y value with a constant in one atomic pass.
#[derive(Debug)]
pub struct WriteTask<F> {
    function: Arc<SynchronizedTabulatedFunction<F>>,
    value: f64,
}

impl<F: TabulatedFunction> WriteTask<F> {
    /// Task writing `value` to every sample.
    pub fn new(function: Arc<SynchronizedTabulatedFunction<F>>, value: f64) -> Self {
        Self { function, value }
    }

    /// One pass over all samples.
    pub fn run(&self) -> Result<(), TabulatedError> {
        self.function.run_atomically(|f| {
            for i in 0..f.count() {
                f.set_y(i, self.value)?;
            }
            Ok::<(), TabulatedError>(())
        })?;
        debug!(value = self.value, "write task finished");
        Ok(())
    }
}

/// Reads every sample with per-call locking.
///
/// Reads do not form a consistent snapshot; use
/// [`SynchronizedTabulatedFunction::snapshot`] when one is needed.
#[derive(Debug)]
pub struct ReadTask<F> {
    function: Arc<SynchronizedTabulatedFunction<F>>,
}

impl<F: TabulatedFunction> ReadTask<F> {
    /// Reader over `function`.
    pub fn new(function: Arc<SynchronizedTabulatedFunction<F>>) -> Self {
        Self { function }
    }

    /// Read and log each sample; returns what was observed.
    pub fn run(&self) -> Result<Vec<Point>, TabulatedError> {
        let count = self.function.count();
        let mut observed = Vec::with_capacity(count);
        for i in 0..count {
            let x = self.function.get_x(i)?;
            let y = self.function.get_y(i)?;
            info!(i, x, y, "read sample");
            observed.push(Point::new(x, y));
        }
        Ok(observed)
    }
}

/// Run one [`MultiplyingTask`] on each of `threads` threads and wait for all.
///
/// With [`Discipline::Atomic`] every y ends at `initial * 2^threads`. A
/// worker panic is propagated to the caller.
pub fn run_doubling_harness<F>(
    shared: &Arc<SynchronizedTabulatedFunction<F>>,
    threads: usize,
    discipline: Discipline,
) -> Result<(), TabulatedError>
where
    F: TabulatedFunction + Send + 'static,
{
    info!(threads, ?discipline, "starting doubling harness");
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let task = MultiplyingTask::with_discipline(Arc::clone(shared), discipline);
            thread::spawn(move || task.run())
        })
        .collect();
    for handle in handles {
        match handle.join() {
            Ok(result) => result?,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
    info!(threads, "doubling harness finished");
    Ok(())
}
