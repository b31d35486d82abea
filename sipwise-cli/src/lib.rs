//! Command-line interface for seeding and querying a Sipwise database.
#![forbid(unsafe_code)]

mod error;
mod explain;
mod recommend;
mod seed;
mod similar;

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sipwise_core::{SqliteStore, StrategyLabel};
use sipwise_fs::PathKind;

pub use error::CliError;

use explain::ExplainArgs;
use recommend::RecommendArgs;
use seed::SeedArgs;
use similar::SimilarArgs;

const ARG_SEED: &str = "seed";
const ARG_DATABASE: &str = "database";
const ARG_USER: &str = "user";
const ARG_DRINK: &str = "drink";
const ARG_LIMIT: &str = "limit";
const ARG_STRATEGY: &str = "strategy";
const ARG_WEIGHTS: &str = "weights";
const ARG_SCORE: &str = "score";
const ARG_AGE_VERIFIED: &str = "age-verified";

/// Run the Sipwise CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Seed(args) => seed::run_seed_with(args, writer),
        Command::Recommend(args) => recommend::run_recommend_with(args, writer),
        Command::Explain(args) => explain::run_explain_with(args, writer),
        Command::Similar(args) => similar::run_similar_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sipwise",
    about = "Seed and query the Sipwise drink recommendation engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a SQLite database from a JSON seed document.
    Seed(SeedArgs),
    /// Recommend drinks for a user.
    Recommend(RecommendArgs),
    /// Explain why a drink suits a user.
    Explain(ExplainArgs),
    /// List drinks similar to a given drink.
    Similar(SimilarArgs),
}

/// Fail unless `path` names an existing regular file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match sipwise_fs::path_kind(path) {
        Ok(PathKind::File) => Ok(()),
        Ok(PathKind::Missing) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(PathKind::Directory | PathKind::Other) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Open an existing database read-only.
fn open_database(path: &Utf8Path) -> Result<SqliteStore, CliError> {
    require_existing(path, ARG_DATABASE)?;
    SqliteStore::open(path.as_std_path()).map_err(|source| CliError::Database {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a JSON document from disk.
fn load_json<T: serde::de::DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let payload = sipwise_fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_strategy(raw: Option<&str>) -> Result<Option<StrategyLabel>, CliError> {
    raw.map(str::parse::<StrategyLabel>)
        .transpose()
        .map_err(CliError::from)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
