//! Content-based scoring against the explicit preference profile.

use sipwise_core::{
    CandidateScorer, ContentWeights, Drink, PreferenceProfile, ScoredCandidate, StrategyTag,
    TasteLevel, UserSignals,
};

const PRICE_REASON: &str = "Within your preferred price range";
const CAFFEINE_REASON: &str = "Within your caffeine limit";
const SUGAR_REASON: &str = "Within your sugar limit";
const POPULAR_REASON: &str = "Popular choice";
const FAVORITE_REASON: &str = "Similar to your favorites";

/// Similarity of two sweetness levels: `max(0, 1 - |a - b| / 10)`.
///
/// # Examples
/// ```
/// use sipwise_core::TasteLevel;
/// use sipwise_scorer::sweetness_similarity;
///
/// let five = TasteLevel::NEUTRAL;
/// assert!((sweetness_similarity(five, five) - 1.0).abs() < f32::EPSILON);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "similarity is a linear falloff over the taste scale"
)]
pub fn sweetness_similarity(drink: TasteLevel, preferred: TasteLevel) -> f32 {
    let distance = f32::from(drink.distance(preferred));
    (1.0 - distance / 10.0).max(0.0)
}

/// Scores every pooled drink against the requester's profile.
///
/// Produces nothing when the requester has no profile. Each candidate
/// carries a sweetness term plus fixed bonuses for tier, caffeine and sugar
/// fit, a constant popularity bonus, and is dampened when the drink is
/// already a favourite.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentScorer {
    weights: ContentWeights,
}

impl ContentScorer {
    /// Construct a scorer with explicit weights.
    #[must_use]
    pub const fn new(weights: ContentWeights) -> Self {
        Self { weights }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "content scoring is a weighted sum of preference fits"
    )]
    fn score_drink(
        &self,
        drink: &Drink,
        profile: &PreferenceProfile,
        favourite: bool,
    ) -> ScoredCandidate {
        let weights = &self.weights;
        let similarity = sweetness_similarity(drink.sweetness, profile.sweetness);
        let mut total = similarity * weights.sweetness;
        let mut reasons = vec![format!(
            "Matches your sweetness preference ({similarity:.2})"
        )];

        if drink.price_tier == profile.preferred_price_tier {
            total += weights.price_tier;
            reasons.push(PRICE_REASON.to_owned());
        }
        if drink.caffeine_mg <= profile.caffeine_limit_mg {
            total += weights.caffeine;
            reasons.push(CAFFEINE_REASON.to_owned());
        }
        if drink.sugar_g <= profile.sugar_limit_g {
            total += weights.sugar;
            reasons.push(SUGAR_REASON.to_owned());
        }
        total += weights.popularity;
        reasons.push(POPULAR_REASON.to_owned());

        if favourite {
            total *= weights.favorite_dampening;
            reasons.push(FAVORITE_REASON.to_owned());
        }

        ScoredCandidate {
            drink: drink.clone(),
            score: total,
            reasons,
            strategy: StrategyTag::Content,
        }
    }
}

impl CandidateScorer for ContentScorer {
    fn tag(&self) -> StrategyTag {
        StrategyTag::Content
    }

    fn score(&self, pool: &[Drink], signals: &UserSignals) -> Vec<ScoredCandidate> {
        let Some(profile) = signals.profile.as_ref() else {
            return Vec::new();
        };
        pool.iter()
            .map(|drink| self.score_drink(drink, profile, signals.is_favorite(drink.id)))
            .collect()
    }
}
