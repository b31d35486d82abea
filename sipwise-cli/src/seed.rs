//! Seed command implementation for the Sipwise CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sipwise_core::{
    ActiveFilter, Drink, Feedback, Interaction, PreferenceProfile, QuizAnswer, SqliteStore,
    SqliteStoreError, UserId,
};
use sipwise_fs::PathKind;

use crate::{ARG_DATABASE, ARG_SEED, CliError, load_json, require_existing, write_json};

pub(crate) const ENV_SEED_DOCUMENT: &str = "SIPWISE_CMDS_SEED_DOCUMENT";
pub(crate) const ENV_SEED_DATABASE: &str = "SIPWISE_CMDS_SEED_DATABASE";

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Create a new SQLite database and fill it from a JSON seed \
                 document holding drinks, preference profiles, filters, \
                 interactions, feedback and quiz answers. The database must \
                 not exist yet.",
    about = "Create a database from a JSON seed document"
)]
#[ortho_config(prefix = "SIPWISE")]
pub(crate) struct SeedArgs {
    /// Path to the JSON seed document.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) document: Option<Utf8PathBuf>,
    /// Path of the SQLite database to create.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl SeedArgs {
    pub(crate) fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedConfig {
    pub(crate) document: Utf8PathBuf,
    pub(crate) database: Utf8PathBuf,
}

impl SeedConfig {
    pub(crate) fn validate_paths(&self) -> Result<(), CliError> {
        require_existing(&self.document, ARG_SEED)?;
        match sipwise_fs::path_kind(&self.database) {
            Ok(PathKind::Missing) => Ok(()),
            Ok(_) => Err(CliError::DatabaseExists {
                path: self.database.clone(),
            }),
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_DATABASE,
                path: self.database.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let document = args.document.ok_or(CliError::MissingArgument {
            field: ARG_SEED,
            env: ENV_SEED_DOCUMENT,
        })?;
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SEED_DATABASE,
        })?;
        Ok(Self { document, database })
    }
}

/// A user's preference profile as it appears in a seed document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SeedProfile {
    pub(crate) user: UserId,
    #[serde(default)]
    pub(crate) profile: PreferenceProfile,
}

/// A user's active filter as it appears in a seed document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SeedFilter {
    pub(crate) user: UserId,
    #[serde(default)]
    pub(crate) filter: ActiveFilter,
}

/// A quiz answer tagged with the user who gave it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SeedQuizAnswer {
    pub(crate) user: UserId,
    #[serde(flatten)]
    pub(crate) answer: QuizAnswer,
}

/// Everything a seed document may contain. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SeedDocument {
    pub(crate) drinks: Vec<Drink>,
    pub(crate) profiles: Vec<SeedProfile>,
    pub(crate) filters: Vec<SeedFilter>,
    pub(crate) interactions: Vec<Interaction>,
    pub(crate) feedback: Vec<Feedback>,
    pub(crate) quiz_answers: Vec<SeedQuizAnswer>,
}

impl SeedDocument {
    /// Validate every drink, keeping the document otherwise untouched.
    fn validated(mut self, path: &Utf8Path) -> Result<Self, CliError> {
        self.drinks = self
            .drinks
            .into_iter()
            .map(Drink::validate)
            .collect::<Result<_, _>>()
            .map_err(|source| CliError::InvalidDrink {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self)
    }

    fn write_to(&self, store: &SqliteStore) -> Result<(), SqliteStoreError> {
        for drink in &self.drinks {
            store.insert_drink(drink)?;
        }
        for entry in &self.profiles {
            store.upsert_profile(entry.user, &entry.profile)?;
        }
        for entry in &self.filters {
            store.activate_filter(entry.user, &entry.filter)?;
        }
        for interaction in &self.interactions {
            store.upsert_interaction(interaction)?;
        }
        for feedback in &self.feedback {
            store.insert_feedback(feedback)?;
        }
        for entry in &self.quiz_answers {
            store.insert_quiz_answer(entry.user, &entry.answer)?;
        }
        Ok(())
    }

    fn summary(&self, database: &Utf8Path) -> SeedSummary {
        SeedSummary {
            database: database.to_path_buf(),
            drinks: self.drinks.len(),
            profiles: self.profiles.len(),
            filters: self.filters.len(),
            interactions: self.interactions.len(),
            feedback: self.feedback.len(),
            quiz_answers: self.quiz_answers.len(),
        }
    }
}

/// Counts of the records written by `seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SeedSummary {
    pub(crate) database: Utf8PathBuf,
    pub(crate) drinks: usize,
    pub(crate) profiles: usize,
    pub(crate) filters: usize,
    pub(crate) interactions: usize,
    pub(crate) feedback: usize,
    pub(crate) quiz_answers: usize,
}

pub(crate) fn run_seed_with(args: SeedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = execute_seed(&config)?;
    write_json(writer, &summary)
}

pub(crate) fn execute_seed(config: &SeedConfig) -> Result<SeedSummary, CliError> {
    config.validate_paths()?;
    let document = load_json::<SeedDocument>(&config.document)?.validated(&config.document)?;
    sipwise_fs::ensure_parent_dir(&config.database).map_err(|source| {
        CliError::CreateParentDir {
            path: config.database.clone(),
            source,
        }
    })?;
    let database_error = |source| CliError::Database {
        path: config.database.clone(),
        source,
    };
    let store = SqliteStore::create(config.database.as_std_path()).map_err(database_error)?;
    document.write_to(&store).map_err(database_error)?;
    let summary = document.summary(&config.database);
    log::debug!(
        "seeded {} drinks and {} interactions into {}",
        summary.drinks,
        summary.interactions,
        summary.database
    );
    Ok(summary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SeedConfig, CliError> {
    let merged = SeedArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SeedConfig::try_from(merged)
}
