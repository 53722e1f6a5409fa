//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Loading and saving
//! functions in the supported file formats is shared here.

pub mod convert;
pub mod derive;
pub mod eval;
pub mod harness;
pub mod show;
pub mod tabulate;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use tabulated_core::factory::TabulatedFunctionFactory;
use tabulated_core::functions::TabulatedFunctionEnum;
use tabulated_core::io::{read_binary, read_text, write_binary, write_text};
use tabulated_core::traits::TabulatedFunction;
use tracing::debug;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// On-disk representation of a tabulated function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FileFormat {
    /// Count line followed by `x y` lines
    #[default]
    Text,
    /// Big-endian count and f64 pairs
    Binary,
    /// serde JSON encoding
    Json,
}

/// Read a function from `path`, stored as configured.
pub fn load(path: &Path, format: FileFormat, config: &CliConfig) -> Result<TabulatedFunctionEnum> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let function = match format {
        FileFormat::Text => read_text(BufReader::new(file), &config.storage, config.decimal_separator)?,
        FileFormat::Binary => read_binary(&mut BufReader::new(file), &config.storage)?,
        FileFormat::Json => {
            let decoded: TabulatedFunctionEnum = tabulated_core::io::deserialize(BufReader::new(file))?;
            if decoded.kind() == config.storage {
                decoded
            } else {
                let (xs, ys): (Vec<f64>, Vec<f64>) = decoded.points().map(|p| (p.x, p.y)).unzip();
                config.storage.create(&xs, &ys)?
            }
        }
    };
    debug!(path = %path.display(), ?format, count = function.count(), "loaded function");
    Ok(function)
}

/// Write `function` to `output`, or to stdout when no path is given.
pub fn save(function: &TabulatedFunctionEnum, output: Option<&Path>, format: FileFormat) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match format {
        FileFormat::Text => write_text(&mut writer, function)?,
        FileFormat::Binary => write_binary(&mut writer, function)?,
        FileFormat::Json => {
            tabulated_core::io::serialize(&mut writer, function)?;
            writeln!(writer)?;
        }
    }
    debug!(?output, ?format, "saved function");
    Ok(())
}
