//! Mutex-owning decorator that makes one tabulated function shareable.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::traits::{Insertable, MathFunction, Removable, TabulatedFunction};
use crate::types::{Point, TabulatedError};

/// Thread-safe wrapper around a tabulated function.
///
/// The decorator owns its delegate and the single mutex guarding it. Every
/// accessor takes that lock for the duration of one call. Compound
/// operations that must not interleave with other threads go through
/// [`run_atomically`](Self::run_atomically), which holds the lock for the
/// whole closure.
///
/// Individually-locked calls do not compose: `get_y` followed by `set_y`
/// from two threads can lose an update. Use `run_atomically` for
/// read-modify-write sequences.
///
/// A poisoned lock is recovered, since every delegate operation restores its
/// invariants before it can panic.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use tabulated_core::concurrent::SynchronizedTabulatedFunction;
/// use tabulated_core::functions::ArrayTabulatedFunction;
/// use tabulated_core::traits::TabulatedFunction;
///
/// let f = ArrayTabulatedFunction::new(&[0.0, 1.0], &[1.0, 1.0]).unwrap();
/// let shared = Arc::new(SynchronizedTabulatedFunction::new(f));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || {
///             shared.run_atomically(|f| {
///                 let y = f.get_y(0).unwrap();
///                 f.set_y(0, y * 2.0).unwrap();
///             })
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(shared.get_y(0).unwrap(), 16.0);
/// ```
#[derive(Debug, Default)]
pub struct SynchronizedTabulatedFunction<F> {
    inner: Mutex<F>,
}

impl<F> SynchronizedTabulatedFunction<F> {
    /// Wrap `function`; the decorator becomes its only owner.
    pub fn new(function: F) -> Self {
        Self {
            inner: Mutex::new(function),
        }
    }

    fn lock(&self) -> MutexGuard<'_, F> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `operation` with exclusive access to the delegate.
    ///
    /// No other accessor of this decorator can interleave with the closure.
    /// Calling another method of the same decorator from inside the closure
    /// deadlocks; use the `&mut F` argument instead.
    pub fn run_atomically<R>(&self, operation: impl FnOnce(&mut F) -> R) -> R {
        let mut guard = self.lock();
        operation(&mut guard)
    }

    /// Consume the decorator and return the delegate.
    pub fn into_inner(self) -> F {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access without locking; `&mut self` already proves no
    /// other thread holds a reference.
    pub fn get_mut(&mut self) -> &mut F {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: TabulatedFunction> SynchronizedTabulatedFunction<F> {
    /// Overwrite the y value at `index` through a shared reference.
    pub fn set_y(&self, index: usize, value: f64) -> Result<(), TabulatedError> {
        self.lock().set_y(index, value)
    }

    /// Snapshot of the current points, taken under one lock.
    pub fn snapshot(&self) -> Vec<Point> {
        self.lock().to_points()
    }
}

impl<F: Insertable> SynchronizedTabulatedFunction<F> {
    /// Insert through a shared reference.
    pub fn insert(&self, x: f64, y: f64) {
        self.lock().insert(x, y)
    }
}

impl<F: Removable> SynchronizedTabulatedFunction<F> {
    /// Remove through a shared reference.
    pub fn remove(&self, index: usize) -> Result<(), TabulatedError> {
        self.lock().remove(index)
    }
}

impl<F: MathFunction> MathFunction for SynchronizedTabulatedFunction<F> {
    fn apply(&self, x: f64) -> f64 {
        self.lock().apply(x)
    }
}

impl<F: TabulatedFunction> TabulatedFunction for SynchronizedTabulatedFunction<F> {
    fn count(&self) -> usize {
        self.lock().count()
    }

    fn get_x(&self, index: usize) -> Result<f64, TabulatedError> {
        self.lock().get_x(index)
    }

    fn get_y(&self, index: usize) -> Result<f64, TabulatedError> {
        self.lock().get_y(index)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedError> {
        self.get_mut().set_y(index, value)
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.lock().index_of_x(x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.lock().index_of_y(y)
    }

    fn left_bound(&self) -> f64 {
        self.lock().left_bound()
    }

    fn right_bound(&self) -> f64 {
        self.lock().right_bound()
    }

    fn floor_index_of_x(&self, x: f64) -> Result<usize, TabulatedError> {
        self.lock().floor_index_of_x(x)
    }

    fn extrapolate_left(&self, x: f64) -> f64 {
        self.lock().extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> f64 {
        self.lock().extrapolate_right(x)
    }

    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedError> {
        self.lock().interpolate(x, floor_index)
    }

    /// Iterates a snapshot; later mutation is not observed.
    fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        Box::new(self.snapshot().into_iter())
    }

    /// Whole dispatch under one lock.
    fn try_apply(&self, x: f64) -> Result<f64, TabulatedError> {
        self.lock().try_apply(x)
    }
}

impl<F: Insertable> Insertable for SynchronizedTabulatedFunction<F> {
    fn insert(&mut self, x: f64, y: f64) {
        self.get_mut().insert(x, y)
    }
}

impl<F: Removable> Removable for SynchronizedTabulatedFunction<F> {
    fn remove(&mut self, index: usize) -> Result<(), TabulatedError> {
        self.get_mut().remove(index)
    }
}

impl<F: TabulatedFunction> PartialEq for SynchronizedTabulatedFunction<F> {
    fn eq(&self, other: &Self) -> bool {
        // locking the same mutex twice would deadlock
        if ptr::eq(self, other) {
            return true;
        }
        self.snapshot() == other.snapshot()
    }
}

impl<F: Hash> Hash for SynchronizedTabulatedFunction<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lock().hash(state)
    }
}

impl<F: fmt::Display> fmt::Display for SynchronizedTabulatedFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.lock(), f)
    }
}

impl<F> From<F> for SynchronizedTabulatedFunction<F> {
    fn from(function: F) -> Self {
        Self::new(function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{ArrayTabulatedFunction, LinkedListTabulatedFunction};
    use std::collections::hash_map::DefaultHasher;
    use std::sync::Arc;
    use std::thread;

    fn list() -> SynchronizedTabulatedFunction<LinkedListTabulatedFunction> {
        SynchronizedTabulatedFunction::new(
            LinkedListTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 10.0, 20.0]).unwrap(),
        )
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_accessors_forward() {
        let f = list();
        assert_eq!(f.count(), 3);
        assert_eq!(f.get_x(1).unwrap(), 1.0);
        assert_eq!(f.index_of_y(20.0), Some(2));
        assert_eq!(f.left_bound(), 0.0);
        assert_eq!(f.right_bound(), 2.0);
        assert_eq!(f.apply(1.5), 15.0);
        assert_eq!(f.apply(3.0), 30.0);
    }

    #[test]
    fn test_shared_mutation() {
        let f = list();
        SynchronizedTabulatedFunction::set_y(&f, 0, -1.0).unwrap();
        SynchronizedTabulatedFunction::insert(&f, 0.5, 5.0);
        SynchronizedTabulatedFunction::remove(&f, 3).unwrap();
        assert_eq!(
            f.snapshot(),
            vec![Point::new(0.0, -1.0), Point::new(0.5, 5.0), Point::new(1.0, 10.0)]
        );
    }

    #[test]
    fn test_points_is_snapshot() {
        let f = list();
        let points = f.points();
        // the lock is not held by the iterator
        SynchronizedTabulatedFunction::set_y(&f, 0, 99.0).unwrap();
        let collected: Vec<Point> = points.collect();
        assert_eq!(collected[0], Point::new(0.0, 0.0));
        assert_eq!(f.get_y(0).unwrap(), 99.0);
    }

    #[test]
    fn test_run_atomically_returns_value() {
        let f = list();
        let sum = f.run_atomically(|inner| inner.points().map(|p| p.y).sum::<f64>());
        assert_eq!(sum, 30.0);
    }

    #[test]
    fn test_equality_hash_display() {
        let a = list();
        let b = list();
        assert!(a == a);
        assert!(a == b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.to_string(), a.into_inner().to_string());
    }

    #[test]
    fn test_poisoned_lock_recovered() {
        let shared = Arc::new(SynchronizedTabulatedFunction::new(
            ArrayTabulatedFunction::new(&[0.0, 1.0], &[1.0, 2.0]).unwrap(),
        ));
        let clone = Arc::clone(&shared);
        let result = thread::spawn(move || {
            clone.run_atomically(|_| panic!("boom"));
        })
        .join();
        assert!(result.is_err());
        assert_eq!(shared.get_y(1).unwrap(), 2.0);
    }

    #[test]
    fn test_atomic_doubling_across_threads() {
        let shared = Arc::new(list());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    shared.run_atomically(|f| {
                        let y = f.get_y(1).unwrap();
                        f.set_y(1, y * 2.0).unwrap();
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.get_y(1).unwrap(), 10.0 * 256.0);
    }
}
