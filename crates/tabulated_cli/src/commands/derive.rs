//! Derive command implementation
//!
//! Differentiates a stored function either with finite differences over its
//! own grid or with a stepping scheme evaluated on that grid.

use std::path::Path;

use clap::ValueEnum;
use tabulated_core::factory::TabulatedFunctionFactory;
use tabulated_core::functions::TabulatedFunctionEnum;
use tabulated_core::operators::{SteppingDifferentialOperator, SteppingScheme, TabulatedDifferentialOperator};
use tabulated_core::traits::{MathFunction, TabulatedFunction};
use tracing::info;

use super::{load, save, FileFormat};
use crate::config::CliConfig;
use crate::Result;

/// Differentiation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    /// Forward/central/backward differences on the sample grid
    #[default]
    Tabulated,
    /// (f(x) - f(x - h)) / h
    Left,
    /// (f(x + h) - f(x - h)) / 2h
    Middle,
    /// (f(x + h) - f(x)) / h
    Right,
}

/// Differentiate `function` with `method`, keeping its x-grid.
pub fn differentiate(
    function: &TabulatedFunctionEnum,
    method: Method,
    step: f64,
    config: &CliConfig,
) -> Result<TabulatedFunctionEnum> {
    let scheme = match method {
        Method::Tabulated => {
            let operator = TabulatedDifferentialOperator::new(config.storage.factory());
            return Ok(operator.derive(function)?);
        }
        Method::Left => SteppingScheme::Left,
        Method::Middle => SteppingScheme::Middle,
        Method::Right => SteppingScheme::Right,
    };
    let derivative = SteppingDifferentialOperator::new(scheme, step)?.derive(function);
    let (xs, ys): (Vec<f64>, Vec<f64>) = function
        .points()
        .map(|p| (p.x, derivative.apply(p.x)))
        .unzip();
    Ok(config.storage.create(&xs, &ys)?)
}

/// Run the derive command
pub fn run(
    input: &Path,
    format: FileFormat,
    method: Method,
    step: f64,
    output: Option<&Path>,
    output_format: FileFormat,
    config: &CliConfig,
) -> Result<()> {
    let function = load(input, format, config)?;
    let derivative = differentiate(&function, method, step, config)?;
    info!(?method, count = derivative.count(), "Derived function");
    save(&derivative, output, output_format)
}
