//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use slotrank_cli::{CliError, run, write_error_response};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            log::error!("slotrank: {err}");
            if let Err(write_err) = write_error_response(&mut std::io::stdout().lock()) {
                log::error!("slotrank: {write_err}");
            }
            ExitCode::FAILURE
        }
    }
}
