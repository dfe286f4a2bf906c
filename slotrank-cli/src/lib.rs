//! Command-line request layer for the SlotRank engine.
//!
//! `slotrank rank` loads a JSON dataset of users and items, ranks the items
//! for one user on one date and prints the result as JSON. Every failure is
//! logged and answered with the same generic error document.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod fs;
mod rank;

pub use error::CliError;
use rank::{RankArgs, run_rank};

pub(crate) const ARG_RANK_DATASET: &str = "dataset";
pub(crate) const ARG_RANK_USER_ID: &str = "user-id";
pub(crate) const ARG_RANK_DATE: &str = "date";
pub(crate) const ARG_RANK_LIMIT: &str = "limit";
pub(crate) const ARG_RANK_SCORING_CONFIG: &str = "scoring-config";
pub(crate) const ARG_RANK_INCLUDE_FULLY_BOOKED: &str = "include-fully-booked";
pub(crate) const ARG_RANK_EXPLAIN: &str = "explain";
pub(crate) const ENV_RANK_DATASET: &str = "SLOTRANK_CMDS_RANK_DATASET";
pub(crate) const ENV_RANK_USER_ID: &str = "SLOTRANK_CMDS_RANK_USER_ID";

/// Message returned for every failed request.
pub const GENERIC_FAILURE: &str = "internal error";

/// Run the SlotRank CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, loading or
/// ranking fails. Nothing is written to stdout in that case.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
    }
}

/// Body of the response sent when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Always [`GENERIC_FAILURE`].
    pub error: &'static str,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self {
            error: GENERIC_FAILURE,
        }
    }
}

/// Write the generic failure document followed by a newline.
///
/// # Errors
/// Returns [`CliError::WriteRankOutput`] when the writer fails.
pub fn write_error_response(writer: &mut dyn Write) -> Result<(), CliError> {
    let payload = serde_json::to_string(&ErrorResponse::default())
        .map_err(CliError::SerializeRankResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRankOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteRankOutput)
}

#[derive(Debug, Parser)]
#[command(
    name = "slotrank",
    about = "Rank bookable items for a user on a given date",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the items of a dataset for one user.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
