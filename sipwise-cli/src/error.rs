//! Error types emitted by the Sipwise CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use sipwise_core::{
    DrinkError, DrinkId, ParseStrategyLabelError, RequestError, SqliteStoreError, StoreError,
    WeightsError,
};
use thiserror::Error;

/// Errors emitted by the Sipwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// `seed` refuses to write into an existing database.
    #[error("database {path:?} already exists")]
    DatabaseExists { path: Utf8PathBuf },
    /// The strategy option did not name a known strategy.
    #[error(transparent)]
    InvalidStrategy(#[from] ParseStrategyLabelError),
    /// The limit option fell outside the accepted range.
    #[error(transparent)]
    InvalidLimit(#[from] RequestError),
    /// The explanation score was NaN or infinite.
    #[error("score must be finite, got {0}")]
    InvalidScore(f32),
    /// Reading a JSON input file failed.
    #[error("failed to read {path:?}: {source}")]
    ReadInput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A JSON input file could not be decoded.
    #[error("failed to parse JSON at {path:?}: {source}")]
    ParseInput {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The weight profile failed validation.
    #[error("weights in {path:?} are invalid: {source}")]
    InvalidWeights {
        path: Utf8PathBuf,
        #[source]
        source: WeightsError,
    },
    /// A seeded drink failed validation.
    #[error("seed document {path:?} holds an invalid drink: {source}")]
    InvalidDrink {
        path: Utf8PathBuf,
        #[source]
        source: DrinkError,
    },
    /// Creating the parent directory of the database failed.
    #[error("failed to create parent directory for {path:?}: {source}")]
    CreateParentDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening, creating or writing the database failed.
    #[error("database {path:?}: {source}")]
    Database {
        path: Utf8PathBuf,
        #[source]
        source: SqliteStoreError,
    },
    /// Looking a drink up in the catalog failed.
    #[error("failed to look up drink {drink}: {source}")]
    LookupDrink {
        drink: DrinkId,
        #[source]
        source: StoreError,
    },
    /// The catalog holds no drink with the requested id.
    #[error("drink {0} is not in the catalog")]
    UnknownDrink(DrinkId),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
