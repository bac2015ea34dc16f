//! Binary entrypoint for the `glint` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A local .env may carry GITLAB_TOKEN.
    let _ = dotenvy::dotenv();
    match glint::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
