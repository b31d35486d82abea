//! Hybrid drink recommendations for Sipwise.
//!
//! [`HybridRecommender`] orchestrates the full request pipeline over any
//! [`sipwise_core::RecommendationStore`]: signal loading, candidate
//! selection, scoring, feedback adjustment, ranking and explanation. The
//! selection and loading steps are exposed for callers that assemble
//! their own pipelines.

#![forbid(unsafe_code)]

mod recommender;
mod selector;
mod signals;

pub use recommender::{HybridRecommender, SIMILAR_SWEETNESS_SPAN, SIMILARITY_SCORE};
pub use selector::{candidate_pool, pool_query, select_pool};
pub use signals::load_signals;
