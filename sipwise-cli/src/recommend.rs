//! Recommend command implementation for the Sipwise CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use sipwise_core::{
    DEFAULT_LIMIT, RecommendationRequest, RecommendationResponse, Recommender, ScoringWeights,
    SqliteStore, UserId,
};
use sipwise_hybrid::HybridRecommender;

use crate::{
    ARG_AGE_VERIFIED, ARG_DATABASE, ARG_LIMIT, ARG_STRATEGY, ARG_USER, ARG_WEIGHTS, CliError,
    load_json, open_database, parse_strategy, require_existing, write_json,
};

pub(crate) const ENV_RECOMMEND_DATABASE: &str = "SIPWISE_CMDS_RECOMMEND_DATABASE";
pub(crate) const ENV_RECOMMEND_USER: &str = "SIPWISE_CMDS_RECOMMEND_USER";

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank drinks for a user by combining content, collaborative \
                 and taste scoring, then print the response with an \
                 explanation per drink as JSON. Alcoholic drinks are only \
                 considered when the user is age verified.",
    about = "Recommend drinks for a user"
)]
#[ortho_config(prefix = "SIPWISE")]
pub(crate) struct RecommendArgs {
    /// Path to the SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// User to recommend for.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<u64>,
    /// Maximum number of results (1 to 50, default 10).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Whether the user may be shown alcoholic drinks.
    #[arg(
        long = ARG_AGE_VERIFIED,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) age_verified: Option<bool>,
    /// Strategy label: content, collaborative, taste or hybrid.
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// JSON weight profile overriding the built-in scoring weights.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) user: UserId,
    pub(crate) request: RecommendationRequest,
    pub(crate) age_verified: bool,
    pub(crate) weights: Option<Utf8PathBuf>,
}

impl RecommendConfig {
    fn build_recommender(&self) -> Result<HybridRecommender<SqliteStore>, CliError> {
        let Some(path) = &self.weights else {
            return open_database(&self.database).map(HybridRecommender::new);
        };
        require_existing(path, ARG_WEIGHTS)?;
        let weights = load_json::<ScoringWeights>(path)?;
        let store = open_database(&self.database)?;
        HybridRecommender::with_weights(store, weights).map_err(|source| {
            CliError::InvalidWeights {
                path: path.clone(),
                source,
            }
        })
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_RECOMMEND_DATABASE,
        })?;
        let user = args.user.map(UserId).ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_RECOMMEND_USER,
        })?;
        let mut request = RecommendationRequest::new(args.limit.unwrap_or(DEFAULT_LIMIT))?;
        if let Some(label) = parse_strategy(args.strategy.as_deref())? {
            request = request.with_strategy(label);
        }
        Ok(Self {
            database,
            user,
            request,
            age_verified: args.age_verified.unwrap_or(false),
            weights: args.weights,
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let response = execute_recommend(&config)?;
    write_json(writer, &response)
}

pub(crate) fn execute_recommend(
    config: &RecommendConfig,
) -> Result<RecommendationResponse, CliError> {
    let recommender = config.build_recommender()?;
    Ok(recommender.recommend(config.user, &config.request, config.age_verified))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
