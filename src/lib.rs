//! Core library entry for the `glint` CLI.
//!
//! `glint` compares two branches of a GitLab repository: commits unique to
//! each side within a date window, files changed between the branches, and
//! an aligned line diff of a single file. The engine lives in [`compare`]
//! and reaches the GitLab API only through the port in [`ports`].

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod error;
pub mod ports;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution
/// fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // Help and version requests are successful exits, not failures.
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start async runtime: {err}"))?;
    runtime.block_on(commands::dispatch(&cli.command))
}
