//! Similar-drinks command implementation for the Sipwise CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sipwise_core::{DEFAULT_LIMIT, DrinkId, Recommendation, RecommendationRequest, UserId};
use sipwise_hybrid::HybridRecommender;

use crate::{ARG_DATABASE, ARG_DRINK, ARG_LIMIT, ARG_USER, CliError, open_database, write_json};

pub(crate) const ENV_SIMILAR_DATABASE: &str = "SIPWISE_CMDS_SIMILAR_DATABASE";
pub(crate) const ENV_SIMILAR_USER: &str = "SIPWISE_CMDS_SIMILAR_USER";
pub(crate) const ENV_SIMILAR_DRINK: &str = "SIPWISE_CMDS_SIMILAR_DRINK";

/// CLI arguments for the `similar` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List drinks in the same category and price tier as the \
                 given drink whose sweetness is within two steps of it, each \
                 with an explanation for the user.",
    about = "List drinks similar to a given drink"
)]
#[ortho_config(prefix = "SIPWISE")]
pub(crate) struct SimilarArgs {
    /// Path to the SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// User the explanations are for.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<u64>,
    /// Drink to find neighbours of.
    #[arg(long = ARG_DRINK, value_name = "id")]
    #[serde(default)]
    pub(crate) drink: Option<u64>,
    /// Maximum number of results (1 to 50, default 10).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl SimilarArgs {
    pub(crate) fn into_config(self) -> Result<SimilarConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimilarConfig::try_from(merged)
    }
}

/// Resolved `similar` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SimilarConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) user: UserId,
    pub(crate) drink: DrinkId,
    pub(crate) limit: usize,
}

impl TryFrom<SimilarArgs> for SimilarConfig {
    type Error = CliError;

    fn try_from(args: SimilarArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SIMILAR_DATABASE,
        })?;
        let user = args.user.map(UserId).ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_SIMILAR_USER,
        })?;
        let drink = args.drink.map(DrinkId).ok_or(CliError::MissingArgument {
            field: ARG_DRINK,
            env: ENV_SIMILAR_DRINK,
        })?;
        let limit = RecommendationRequest::new(args.limit.unwrap_or(DEFAULT_LIMIT))?.limit();
        Ok(Self {
            database,
            user,
            drink,
            limit,
        })
    }
}

pub(crate) fn run_similar_with(args: SimilarArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let similar = execute_similar(&config)?;
    write_json(writer, &similar)
}

pub(crate) fn execute_similar(config: &SimilarConfig) -> Result<Vec<Recommendation>, CliError> {
    let recommender = HybridRecommender::new(open_database(&config.database)?);
    Ok(recommender.similar_drinks(config.user, config.drink, config.limit))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SimilarConfig, CliError> {
    let merged = SimilarArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SimilarConfig::try_from(merged)
}
