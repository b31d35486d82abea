//! Explain command implementation for the Sipwise CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sipwise_core::{CatalogReader, DrinkId, Recommender, StrategyLabel, UserId};
use sipwise_hybrid::{HybridRecommender, SIMILARITY_SCORE};

use crate::{
    ARG_DATABASE, ARG_DRINK, ARG_SCORE, ARG_STRATEGY, ARG_USER, CliError, open_database,
    parse_strategy, write_json,
};

pub(crate) const ENV_EXPLAIN_DATABASE: &str = "SIPWISE_CMDS_EXPLAIN_DATABASE";
pub(crate) const ENV_EXPLAIN_USER: &str = "SIPWISE_CMDS_EXPLAIN_USER";
pub(crate) const ENV_EXPLAIN_DRINK: &str = "SIPWISE_CMDS_EXPLAIN_DRINK";

/// CLI arguments for the `explain` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print up to three reasons why a drink suits a user. The \
                 score feeds the confidence wording and the strategy picks \
                 which reason generators run.",
    about = "Explain why a drink suits a user"
)]
#[ortho_config(prefix = "SIPWISE")]
pub(crate) struct ExplainArgs {
    /// Path to the SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// User the explanation is for.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<u64>,
    /// Drink to explain.
    #[arg(long = ARG_DRINK, value_name = "id")]
    #[serde(default)]
    pub(crate) drink: Option<u64>,
    /// Score the drink was recommended at (default 0.5).
    #[arg(long = ARG_SCORE, value_name = "score")]
    #[serde(default)]
    pub(crate) score: Option<f32>,
    /// Strategy label: content, collaborative, taste or hybrid.
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
}

impl ExplainArgs {
    pub(crate) fn into_config(self) -> Result<ExplainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExplainConfig::try_from(merged)
    }
}

/// Resolved `explain` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExplainConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) user: UserId,
    pub(crate) drink: DrinkId,
    pub(crate) score: f32,
    pub(crate) strategy: StrategyLabel,
}

impl TryFrom<ExplainArgs> for ExplainConfig {
    type Error = CliError;

    fn try_from(args: ExplainArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_EXPLAIN_DATABASE,
        })?;
        let user = args.user.map(UserId).ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_EXPLAIN_USER,
        })?;
        let drink = args.drink.map(DrinkId).ok_or(CliError::MissingArgument {
            field: ARG_DRINK,
            env: ENV_EXPLAIN_DRINK,
        })?;
        let score = args.score.unwrap_or(SIMILARITY_SCORE);
        if !score.is_finite() {
            return Err(CliError::InvalidScore(score));
        }
        let strategy = parse_strategy(args.strategy.as_deref())?.unwrap_or_default();
        Ok(Self {
            database,
            user,
            drink,
            score,
            strategy,
        })
    }
}

/// JSON payload printed by `explain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExplainOutput {
    pub(crate) drink: DrinkId,
    pub(crate) strategy: StrategyLabel,
    pub(crate) reasons: Vec<String>,
}

pub(crate) fn run_explain_with(args: ExplainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let output = execute_explain(&config)?;
    write_json(writer, &output)
}

pub(crate) fn execute_explain(config: &ExplainConfig) -> Result<ExplainOutput, CliError> {
    let store = open_database(&config.database)?;
    let drink = store
        .drink(config.drink)
        .map_err(|source| CliError::LookupDrink {
            drink: config.drink,
            source,
        })?
        .ok_or(CliError::UnknownDrink(config.drink))?;
    let recommender = HybridRecommender::new(store);
    let explanation = recommender.explain(config.user, &drink, config.score, config.strategy);
    Ok(ExplainOutput {
        drink: drink.id,
        strategy: config.strategy,
        reasons: explanation.into_reasons(),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ExplainConfig, CliError> {
    let merged = ExplainArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ExplainConfig::try_from(merged)
}
