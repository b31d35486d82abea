//! Error types raised while ranking scored candidates.

use sipwise_core::{DrinkId, StrategyTag};
use thiserror::Error;

/// Unexpected fault while merging or ranking candidates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    /// A strategy produced a NaN or infinite score.
    #[error("{strategy} strategy produced non-finite score {score} for {drink}")]
    NonFiniteScore {
        /// Affected drink.
        drink: DrinkId,
        /// Strategy that produced the score.
        strategy: StrategyTag,
        /// Offending score.
        score: f32,
    },
}
