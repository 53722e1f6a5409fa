//! Tabulate command implementation
//!
//! Samples an analytic function on a uniform grid.

use std::path::Path;

use clap::ValueEnum;
use tabulated_core::factory::TabulatedFunctionFactory;
use tabulated_core::functions::{ConstantFunction, IdentityFunction, SqrFunction, UnitFunction, ZeroFunction};
use tabulated_core::traits::{MathFunction, TabulatedFunction};
use tracing::info;

use super::{save, FileFormat};
use crate::config::CliConfig;
use crate::Result;

/// Analytic source functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// f(x) = x
    Identity,
    /// f(x) = x²
    Sqr,
    /// f(x) = 0
    Zero,
    /// f(x) = 1
    Unit,
    /// f(x) = value
    Constant,
}

impl Source {
    /// The function, optionally followed by squaring.
    pub fn build(self, value: f64, squared: bool) -> Box<dyn MathFunction> {
        let base: Box<dyn MathFunction> = match self {
            Source::Identity => Box::new(IdentityFunction),
            Source::Sqr => Box::new(SqrFunction),
            Source::Zero => Box::new(ZeroFunction),
            Source::Unit => Box::new(UnitFunction),
            Source::Constant => Box::new(ConstantFunction::new(value)),
        };
        if squared {
            Box::new(base.and_then(SqrFunction))
        } else {
            base
        }
    }
}

/// Arguments of the tabulate command
#[derive(Debug, Clone)]
pub struct TabulateArgs<'a> {
    pub source: Source,
    pub value: f64,
    pub squared: bool,
    pub from: f64,
    pub to: f64,
    pub count: usize,
    pub output: Option<&'a Path>,
    pub format: FileFormat,
}

/// Run the tabulate command
pub fn run(args: &TabulateArgs<'_>, config: &CliConfig) -> Result<()> {
    let source = args.source.build(args.value, args.squared);
    let function = config
        .storage
        .create_from_function(source.as_ref(), args.from, args.to, args.count)?;
    info!(
        source = ?args.source,
        squared = args.squared,
        count = function.count(),
        storage = %config.storage,
        "Tabulated function"
    );
    save(&function, args.output, args.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources() {
        assert_eq!(Source::Identity.build(0.0, false).apply(3.0), 3.0);
        assert_eq!(Source::Sqr.build(0.0, false).apply(3.0), 9.0);
        assert_eq!(Source::Constant.build(2.5, false).apply(3.0), 2.5);
        assert_eq!(Source::Constant.build(3.0, true).apply(-1.0), 9.0);
        assert_eq!(Source::Sqr.build(0.0, true).apply(2.0), 16.0);
        assert_eq!(Source::Zero.build(0.0, true).apply(5.0), 0.0);
        assert_eq!(Source::Unit.build(0.0, false).apply(5.0), 1.0);
    }

    #[test]
    fn test_run_writes_file() {
        let path = std::env::temp_dir().join(format!("tabulated_cli_tabulate_{}.txt", std::process::id()));
        let args = TabulateArgs {
            source: Source::Sqr,
            value: 0.0,
            squared: false,
            from: 0.0,
            to: 2.0,
            count: 3,
            output: Some(&path),
            format: FileFormat::Text,
        };
        run(&args, &CliConfig::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, "3\n0 0\n1 1\n2 4\n");
    }
}
