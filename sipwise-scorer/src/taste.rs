//! Taste-preference scoring from the secondary profile signals.

use sipwise_core::{
    CandidateScorer, Drink, PreferenceProfile, ScoredCandidate, StrategyTag, TasteWeights,
    UserSignals,
};

const BITTERNESS_REASON: &str = "Bitterness level matches your preference";
const CATEGORY_REASON: &str = "From your preferred category";
const TIME_REASON: &str = "Suitable for current time";
const MODE_REASON: &str = "Matches your preferred mode";

/// Half-width of the bitterness scale used to normalise the distance from
/// the midpoint.
const BITTERNESS_SPAN: f32 = 5.0;

/// Scores pooled drinks on bitterness, category affinity and the presence
/// of time or mode rules.
///
/// Bitterness is compared against a fixed midpoint rather than the drink,
/// so the term is identical for every drink of one requester. Candidates
/// whose total is not positive are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TasteScorer {
    weights: TasteWeights,
}

impl TasteScorer {
    /// Construct a scorer with explicit weights.
    #[must_use]
    pub const fn new(weights: TasteWeights) -> Self {
        Self { weights }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "bitterness fit is a normalised distance from the midpoint"
    )]
    fn bitterness_term(&self, profile: &PreferenceProfile) -> f32 {
        let distance = f32::from(self.weights.bitterness_midpoint.abs_diff(profile.bitterness.get()));
        (1.0 - distance / BITTERNESS_SPAN) * self.weights.bitterness
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "taste scoring is a weighted sum of profile signals"
    )]
    fn score_drink(&self, drink: &Drink, profile: &PreferenceProfile) -> Option<ScoredCandidate> {
        let mut total = self.bitterness_term(profile);
        let mut reasons = vec![BITTERNESS_REASON.to_owned()];

        if profile.prefers_category(&drink.category) {
            total += self.weights.category;
            reasons.push(CATEGORY_REASON.to_owned());
        }
        if !profile.time_sensitivity.is_empty() {
            total += self.weights.time_sensitivity;
            reasons.push(TIME_REASON.to_owned());
        }
        if !profile.mode_preferences.is_empty() {
            total += self.weights.mode;
            reasons.push(MODE_REASON.to_owned());
        }

        (total > 0.0).then(|| ScoredCandidate {
            drink: drink.clone(),
            score: total,
            reasons,
            strategy: StrategyTag::Taste,
        })
    }
}

impl CandidateScorer for TasteScorer {
    fn tag(&self) -> StrategyTag {
        StrategyTag::Taste
    }

    fn score(&self, pool: &[Drink], signals: &UserSignals) -> Vec<ScoredCandidate> {
        let Some(profile) = signals.profile.as_ref() else {
            return Vec::new();
        };
        pool.iter()
            .filter_map(|drink| self.score_drink(drink, profile))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        clippy::indexing_slicing,
        clippy::float_arithmetic,
        reason = "tests assert on known fixtures"
    )]

    use super::*;
    use rstest::{fixture, rstest};
    use sipwise_core::{DrinkId, PriceTier, TasteLevel, UserId};

    const USER: UserId = UserId(1);

    #[fixture]
    fn pool() -> Vec<Drink> {
        vec![
            Drink::new(DrinkId(1), "Matcha", "tea", PriceTier::Standard),
            Drink::new(DrinkId(2), "Cola", "soda", PriceTier::Budget),
        ]
    }

    fn signals_for(profile: PreferenceProfile) -> UserSignals {
        UserSignals::empty(USER).with_profile(profile)
    }

    #[rstest]
    fn neutral_bitterness_earns_full_term(pool: Vec<Drink>) {
        let scored = TasteScorer::default().score(&pool, &signals_for(PreferenceProfile::default()));
        assert_eq!(scored.len(), 2);
        assert!((scored[0].score - 0.2).abs() < 1e-6);
        assert_eq!(scored[0].reasons, vec![BITTERNESS_REASON]);
    }

    #[rstest]
    fn category_time_and_mode_add_bonuses(pool: Vec<Drink>) {
        let profile = PreferenceProfile::default()
            .with_preferred_category("tea")
            .with_time_rule("evening", "decaf")
            .with_mode("energy", false);
        let scored = TasteScorer::default().score(&pool, &signals_for(profile));
        assert!((scored[0].score - 0.7).abs() < 1e-6);
        assert!((scored[1].score - 0.4).abs() < 1e-6);
        assert_eq!(
            scored[0].reasons,
            vec![BITTERNESS_REASON, CATEGORY_REASON, TIME_REASON, MODE_REASON]
        );
    }

    #[rstest]
    fn zero_scores_are_dropped(pool: Vec<Drink>) {
        let profile = PreferenceProfile::default()
            .with_bitterness(TasteLevel::new(10).expect("valid level"));
        let scored = TasteScorer::default().score(&pool, &signals_for(profile));
        assert!(scored.is_empty());
    }

    #[rstest]
    fn no_profile_means_no_candidates(pool: Vec<Drink>) {
        assert!(TasteScorer::default().score(&pool, &UserSignals::empty(USER)).is_empty());
    }
}
