//! Scoring strategies and ranking for Sipwise drink recommendations.
//!
//! The crate provides the three independent strategies that score a shared
//! candidate pool, the feedback adjuster that rescales their output, and
//! the ranker that merges everything into one bounded list:
//! - [`ContentScorer`] compares drinks with the explicit preference profile.
//! - [`CollaborativeScorer`] surfaces drinks favourited by similar users.
//! - [`TasteScorer`] rewards secondary taste signals.
//! - [`FeedbackAdjuster`] applies feedback and rating multipliers.
//! - [`rank`] deduplicates by strategy priority, sorts and truncates.
//!
//! Scores are unnormalised and only meaningful relative to each other.
//!
//! # Examples
//!
//! ```
//! use sipwise_core::{
//!     CandidateScorer, Drink, DrinkId, PreferenceProfile, PriceTier, UserId, UserSignals,
//! };
//! use sipwise_scorer::{ContentScorer, FeedbackAdjuster, TasteScorer, rank};
//!
//! let pool = vec![Drink::new(DrinkId(1), "Chai", "tea", PriceTier::Standard)];
//! let signals = UserSignals::empty(UserId(1)).with_profile(PreferenceProfile::default());
//!
//! let mut scored = ContentScorer::default().score(&pool, &signals);
//! scored.extend(TasteScorer::default().score(&pool, &signals));
//! let adjusted = FeedbackAdjuster::default().adjust(scored, &signals);
//! let ranking = rank(adjusted, 10).expect("finite scores");
//! assert_eq!(ranking.total_count, 1);
//! ```

#![forbid(unsafe_code)]

mod collaborative;
mod content;
mod error;
mod feedback;
mod rank;
mod taste;

pub use collaborative::CollaborativeScorer;
pub use content::{ContentScorer, sweetness_similarity};
pub use error::ComputeError;
pub use feedback::FeedbackAdjuster;
pub use rank::{Ranking, rank};
pub use taste::TasteScorer;
