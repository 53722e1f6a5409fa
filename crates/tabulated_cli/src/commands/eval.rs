//! Eval command implementation
//!
//! Evaluates a stored function at the requested points, interpolating
//! between samples and extrapolating beyond them.

use std::path::Path;

use tabulated_core::traits::TabulatedFunction;
use tracing::info;

use super::{load, FileFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the eval command
pub fn run(input: &Path, format: FileFormat, points: &[f64], config: &CliConfig) -> Result<()> {
    if points.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one evaluation point is required".to_string(),
        ));
    }
    let function = load(input, format, config)?;
    info!(points = points.len(), "Evaluating function");
    for &x in points {
        println!("{} {}", x, function.try_apply(x)?);
    }
    Ok(())
}
