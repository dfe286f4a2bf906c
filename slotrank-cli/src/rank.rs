//! Rank command implementation for the SlotRank CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use slotrank_core::{Item, MemoryDirectory, ScoredItem, SearchParams, User, UserSource};
use slotrank_scorer::{RankError, RankingService, ScoreBreakdown, ScoringConfig, WeightedScorer};

use crate::{
    ARG_RANK_DATASET, ARG_RANK_DATE, ARG_RANK_EXPLAIN, ARG_RANK_INCLUDE_FULLY_BOOKED,
    ARG_RANK_LIMIT, ARG_RANK_SCORING_CONFIG, ARG_RANK_USER_ID, CliError, ENV_RANK_DATASET,
    ENV_RANK_USER_ID, fs::file_is_file, fs::open_utf8_file,
};

/// Result limit applied when the request does not set one.
pub(crate) const REQUEST_RESULT_LIMIT: usize = 15;

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the items of a JSON dataset ({\"users\": [...], \"items\": [...]}) \
                 for one user on one calendar date. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Rank bookable items for a user"
)]
#[ortho_config(prefix = "SLOTRANK")]
pub(crate) struct RankArgs {
    /// Path to a JSON dataset of users and items.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identifier of the user to rank for.
    #[arg(long = ARG_RANK_USER_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// Search date as YYYY-MM-DD or an RFC 3339 timestamp. Defaults to today
    /// (UTC).
    #[arg(long = ARG_RANK_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<String>,
    /// Maximum number of results (default 15).
    #[arg(long = ARG_RANK_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Path to a JSON scoring configuration overriding weights and ceilings.
    #[arg(long = ARG_RANK_SCORING_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) scoring_config: Option<Utf8PathBuf>,
    /// Keep candidates that have no free slot on the search date.
    #[arg(long = ARG_RANK_INCLUDE_FULLY_BOOKED)]
    #[serde(default)]
    pub(crate) include_fully_booked: bool,
    /// Include every sub-score alongside each result.
    #[arg(long = ARG_RANK_EXPLAIN)]
    #[serde(default)]
    pub(crate) explain: bool,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    /// Path to the JSON dataset.
    pub(crate) dataset: Utf8PathBuf,
    /// User to rank for.
    pub(crate) user_id: String,
    /// Date and limit.
    pub(crate) params: SearchParams,
    /// Optional scoring configuration file.
    pub(crate) scoring_config: Option<Utf8PathBuf>,
    /// Whether fully booked candidates stay in the ranking.
    pub(crate) include_fully_booked: bool,
    /// Whether results carry their score breakdown.
    pub(crate) explain: bool,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_RANK_DATASET)?;
        if let Some(path) = &self.scoring_config {
            require_existing(path, ARG_RANK_SCORING_CONFIG)?;
        }
        Ok(())
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_RANK_DATASET,
            env: ENV_RANK_DATASET,
        })?;
        let user_id = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_RANK_USER_ID,
            env: ENV_RANK_USER_ID,
        })?;
        let search = match args.date.as_deref() {
            Some(raw) => SearchParams::parse(raw)?,
            None => SearchParams::new(today()),
        };
        let params = search.with_limit(args.limit.unwrap_or(REQUEST_RESULT_LIMIT))?;

        Ok(Self {
            dataset,
            user_id,
            params,
            scoring_config: args.scoring_config,
            include_fully_booked: args.include_fully_booked,
            explain: args.explain,
        })
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// One ranked result as written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct RankedEntry {
    pub(crate) score: f64,
    pub(crate) item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) breakdown: Option<ScoreBreakdown>,
}

/// Successful response for the `rank` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RankResponse {
    pub(crate) user_id: String,
    #[serde(with = "slotrank_core::calendar::serde_date")]
    pub(crate) date: NaiveDate,
    pub(crate) results: Vec<RankedEntry>,
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let response = execute_rank(&config)?;
    write_rank_response(writer, &response)
}

pub(crate) fn execute_rank(config: &RankConfig) -> Result<RankResponse, CliError> {
    let scoring = match &config.scoring_config {
        Some(path) => load_json::<ScoringConfig>(path, ARG_RANK_SCORING_CONFIG)?,
        None => ScoringConfig::default(),
    };
    let directory = load_json::<MemoryDirectory>(&config.dataset, ARG_RANK_DATASET)?;
    log::info!(
        "loaded {} users and {} items from {}",
        directory.users().len(),
        directory.items().len(),
        config.dataset
    );

    let service = RankingService::with_scorer(directory, WeightedScorer::new(scoring))
        .exclude_fully_booked(!config.include_fully_booked);
    let ranked = service.rank_for_user(&config.user_id, &config.params)?;

    let scorer = service.scorer();
    let explained_for = config
        .explain
        .then(|| service.directory().fetch_user(&config.user_id))
        .transpose()
        .map_err(RankError::from)?;
    let results = ranked
        .into_iter()
        .map(|entry| to_entry(entry, scorer, explained_for.as_ref(), &config.params))
        .collect();

    Ok(RankResponse {
        user_id: config.user_id.clone(),
        date: config.params.date,
        results,
    })
}

fn to_entry(
    entry: ScoredItem,
    scorer: &WeightedScorer,
    user: Option<&User>,
    params: &SearchParams,
) -> RankedEntry {
    let breakdown = user.map(|explained| scorer.breakdown(&entry.item, explained, params));
    RankedEntry {
        score: entry.score,
        item: entry.item,
        breakdown,
    }
}

/// Loads a JSON document from disk.
pub(crate) fn load_json<T: DeserializeOwned>(
    path: &Utf8Path,
    field: &'static str,
) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn write_rank_response(writer: &mut dyn Write, response: &RankResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerializeRankResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRankOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteRankOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
