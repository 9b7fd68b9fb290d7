//! Entry point shared by the binary shim.

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::commands;

/// Parses `args` (without the program name) and runs the strip command.
///
/// Returns the process exit code. Help/version requests and argument errors
/// are printed by clap and mapped to its exit codes.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    let argv = std::iter::once("logstrip".to_owned()).chain(args);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(err.exit_code());
        }
    };
    commands::run_strip(&cli, std::io::stdout().lock())
}
