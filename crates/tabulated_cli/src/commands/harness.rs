//! Harness command implementation
//!
//! Runs concurrent doubling tasks against one shared synchronized function
//! and reports whether every update survived.

use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use tabulated_core::concurrent::{run_doubling_harness, Discipline, ReadTask, SynchronizedTabulatedFunction};
use tabulated_core::factory::TabulatedFunctionFactory;
use tabulated_core::functions::{IdentityFunction, TabulatedFunctionEnum};
use tabulated_core::types::Point;
use tracing::{info, warn};

use super::{load, FileFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Locking discipline selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HarnessDiscipline {
    /// One lock acquisition per pass
    #[default]
    Atomic,
    /// One lock acquisition per get/set call
    PerCall,
}

impl From<HarnessDiscipline> for Discipline {
    fn from(discipline: HarnessDiscipline) -> Self {
        match discipline {
            HarnessDiscipline::Atomic => Discipline::Atomic,
            HarnessDiscipline::PerCall => Discipline::PerCall,
        }
    }
}

/// Outcome of one harness run
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessReport {
    pub threads: usize,
    pub before: Vec<Point>,
    pub after: Vec<Point>,
}

impl HarnessReport {
    /// Samples whose final value differs from `initial * 2^threads`
    pub fn lost_updates(&self) -> usize {
        let factor = 2f64.powi(self.threads as i32);
        self.before
            .iter()
            .zip(self.after.iter())
            .filter(|(b, a)| a.y != b.y * factor)
            .count()
    }
}

/// Double every sample of `function` once per thread.
pub fn execute(
    function: TabulatedFunctionEnum,
    threads: usize,
    discipline: HarnessDiscipline,
) -> Result<HarnessReport> {
    let shared = Arc::new(SynchronizedTabulatedFunction::new(function));
    let before = shared.snapshot();
    run_doubling_harness(&shared, threads, discipline.into())?;
    let after = ReadTask::new(Arc::clone(&shared)).run()?;
    Ok(HarnessReport {
        threads,
        before,
        after,
    })
}

/// Run the harness command
pub fn run(
    input: Option<&Path>,
    format: FileFormat,
    count: usize,
    threads: Option<usize>,
    discipline: HarnessDiscipline,
    config: &CliConfig,
) -> Result<()> {
    let threads = threads.unwrap_or(config.threads);
    if threads == 0 {
        return Err(CliError::InvalidArgument("thread count must be at least 1".to_string()));
    }
    let function = match input {
        Some(path) => load(path, format, config)?,
        // y = x on 1..=count keeps every sample non-zero
        None => config
            .storage
            .create_from_function(&IdentityFunction, 1.0, count as f64, count)?,
    };
    info!(threads, ?discipline, storage = %config.storage, "Running concurrency harness");

    let report = execute(function, threads, discipline)?;
    let lost = report.lost_updates();
    if lost > 0 {
        warn!(lost, "Updates lost under per-call locking");
    }
    for (b, a) in report.before.iter().zip(report.after.iter()) {
        println!("{} {} -> {}", b.x, b.y, a.y);
    }
    println!("threads = {}, samples = {}, lost = {}", threads, report.after.len(), lost);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabulated_core::factory::StorageKind;

    #[test]
    fn test_atomic_harness_loses_nothing() {
        let f = StorageKind::LinkedList
            .create_from_function(&IdentityFunction, 1.0, 5.0, 5)
            .unwrap();
        let report = execute(f, 8, HarnessDiscipline::Atomic).unwrap();
        assert_eq!(report.lost_updates(), 0);
        assert_eq!(report.after[4], Point::new(5.0, 5.0 * 256.0));
    }

    #[test]
    fn test_discipline_conversion() {
        assert_eq!(Discipline::from(HarnessDiscipline::PerCall), Discipline::PerCall);
        assert_eq!(Discipline::from(HarnessDiscipline::default()), Discipline::Atomic);
    }
}
