//! Show command implementation

use std::path::Path;

use tabulated_core::traits::TabulatedFunction;
use tracing::info;

use super::{load, FileFormat};
use crate::config::CliConfig;
use crate::Result;

/// Run the show command: print the function with its bounds
pub fn run(input: &Path, format: FileFormat, config: &CliConfig) -> Result<()> {
    let function = load(input, format, config)?;
    info!(kind = %function.kind(), count = function.count(), "Showing function");
    println!("{}", function);
    println!("domain = [{}, {}]", function.left_bound(), function.right_bound());
    Ok(())
}
