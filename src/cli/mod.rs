//! CLI module for itemstore
//!
//! Provides command-line interface for:
//! - serve: Boot the store and serve the HTTP API
//! - init: Create the items table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs, StoreArgs};
pub use commands::{init, load_config, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command.
///
/// A `.env` file in the working directory is loaded first so its values are
/// visible to argument parsing.
pub fn run() -> CliResult<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();
    run_command(cli.command)
}
