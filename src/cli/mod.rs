//! Command line interface for appimage_integrate.
//!
//! Argument parsing, command execution, and user feedback live here; the
//! pipeline stages themselves are library modules.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;
use clap::Parser;
use clap::error::ErrorKind;

/// Main CLI entry point.
///
/// Returns the process exit code. Argument errors print the usage message
/// and map to exit code 1; `--help`/`--version` map to 0.
pub fn run() -> Result<i32> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(0);
        }
        Err(err) => {
            let _ = err.print();
            return Ok(1);
        }
    };
    execute_command(args)
}
