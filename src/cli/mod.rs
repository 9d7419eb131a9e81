//! CLI module
//!
//! Provides command-line interface for:
//! - serve: run the record API over a storage engine
//! - client: interactive terminal client for a running server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{client, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

use crate::observability;

/// Parse arguments, install logging and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    observability::init_logging();
    run_command(cli.command)
}
