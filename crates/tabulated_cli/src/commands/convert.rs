//! Convert command implementation

use std::path::Path;

use tracing::info;

use super::{load, save, FileFormat};
use crate::config::CliConfig;
use crate::Result;

/// Run the convert command: re-encode a stored function in another format
pub fn run(
    input: &Path,
    from: FileFormat,
    output: Option<&Path>,
    to: FileFormat,
    config: &CliConfig,
) -> Result<()> {
    let function = load(input, from, config)?;
    info!(?from, ?to, storage = %config.storage, "Converting function");
    save(&function, output, to)
}
