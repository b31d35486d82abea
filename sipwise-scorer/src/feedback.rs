//! Multiplicative re-ranking from the requester's feedback and ratings.

use sipwise_core::{FeedbackKind, FeedbackWeights, ScoredCandidate, UserSignals};

const NOT_PREFERRED_REASON: &str = "Previously marked as not preferred";
const TASTE_FEEDBACK_REASON: &str = "Previously provided feedback on taste";
const HIGH_RATING_REASON: &str = "Similar to highly rated drinks";

/// Rescales scored candidates using feedback and ratings.
///
/// Adjustments compound: a drink marked `not_for_me` is scaled down, a
/// drink reported too sweet or too bitter (and not dismissed) is scaled
/// down less, and a highly rated drink is boosted on top of either. The
/// adjuster never adds or removes candidates and never clamps scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackAdjuster {
    weights: FeedbackWeights,
}

impl FeedbackAdjuster {
    /// Construct an adjuster with explicit multipliers.
    #[must_use]
    pub const fn new(weights: FeedbackWeights) -> Self {
        Self { weights }
    }

    /// Adjust every candidate in place order.
    #[must_use]
    pub fn adjust(
        &self,
        candidates: Vec<ScoredCandidate>,
        signals: &UserSignals,
    ) -> Vec<ScoredCandidate> {
        candidates
            .into_iter()
            .map(|candidate| self.adjust_one(candidate, signals))
            .collect()
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "feedback adjustments are multiplicative"
    )]
    fn adjust_one(&self, mut candidate: ScoredCandidate, signals: &UserSignals) -> ScoredCandidate {
        let id = candidate.drink.id;
        if signals.has_feedback(id, FeedbackKind::NotForMe) {
            candidate.score *= self.weights.not_for_me;
            candidate.reasons.push(NOT_PREFERRED_REASON.to_owned());
        } else if signals.has_feedback(id, FeedbackKind::TooSweet)
            || signals.has_feedback(id, FeedbackKind::TooBitter)
        {
            candidate.score *= self.weights.taste_mismatch;
            candidate.reasons.push(TASTE_FEEDBACK_REASON.to_owned());
        }
        if signals.rating(id) >= self.weights.high_rating_threshold {
            candidate.score *= self.weights.high_rating_boost;
            candidate.reasons.push(HIGH_RATING_REASON.to_owned());
        }
        candidate
    }
}
