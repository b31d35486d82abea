//! Core domain types for the Sipwise drink recommendation engine.
//!
//! The crate defines the catalog and user-state records, the versioned
//! weight profile, the traits implemented by scoring strategies and
//! recommenders, and the collaborator traits through which persisted state
//! is read. Constructors validate and return `Result` so invalid records
//! are rejected before they reach a scorer.

mod activity;
mod candidate;
mod drink;
mod ids;
mod level;
mod profile;
mod query;
mod recommend;
mod signals;
pub mod store;
mod weights;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use activity::{
    Feedback, FeedbackKind, HIGH_RATING, Interaction, ParseFeedbackKindError, QuizAnswer,
};
pub use candidate::{
    CandidateScorer, ParseStrategyLabelError, ScoredCandidate, StrategyLabel, StrategyTag,
};
pub use drink::{Drink, DrinkError, Ingredient};
pub use ids::{DrinkId, UserId};
pub use level::{ParsePriceTierError, PriceTier, TasteLevel, TasteLevelError};
pub use profile::{ActiveFilter, PreferenceProfile};
pub use query::{CANDIDATE_POOL_LIMIT, DrinkQuery};
pub use recommend::{
    DEFAULT_LIMIT, Explanation, FALLBACK_REASON, MAX_LIMIT, MAX_REASONS, MIN_LIMIT,
    Recommendation, RecommendationRequest, RecommendationResponse, Recommender, RequestError,
};
pub use signals::UserSignals;
pub use store::{
    CatalogReader, FeedbackStore, InteractionStore, PreferenceStore, QuizStore,
    RecommendationStore, StoreArea, StoreError,
};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteStore, SqliteStoreError};
pub use weights::{
    CollaborativeWeights, ContentWeights, FeedbackWeights, MAX_MULTIPLIER, ScoringWeights,
    TasteWeights, WEIGHTS_VERSION, WeightsError,
};
