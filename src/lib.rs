//! Facade crate for the Sipwise drink recommendation engine.
//!
//! This crate re-exports the core domain types, the scoring strategies and
//! the explanation generator, and exposes the hybrid recommender and the
//! SQLite store behind feature flags.

#![forbid(unsafe_code)]

pub use sipwise_core::{
    ActiveFilter, CandidateScorer, CatalogReader, Drink, DrinkError, DrinkId, DrinkQuery,
    Explanation, Feedback, FeedbackKind, FeedbackStore, Ingredient, Interaction,
    InteractionStore, PreferenceProfile, PreferenceStore, PriceTier, QuizAnswer, QuizStore,
    Recommendation, RecommendationRequest, RecommendationResponse, RecommendationStore,
    Recommender, RequestError, ScoredCandidate, ScoringWeights, StoreArea, StoreError,
    StrategyLabel, StrategyTag, TasteLevel, UserId, UserSignals, WeightsError,
};

#[cfg(feature = "store-sqlite")]
pub use sipwise_core::{SqliteStore, SqliteStoreError};

#[cfg(feature = "test-support")]
pub use sipwise_core::test_support;

pub use sipwise_explain::{ExplanationError, ExplanationGenerator};
pub use sipwise_scorer::{
    CollaborativeScorer, ComputeError, ContentScorer, FeedbackAdjuster, Ranking, TasteScorer,
    rank,
};

#[cfg(feature = "hybrid")]
pub use sipwise_hybrid::HybridRecommender;
