//! The hybrid recommendation pipeline.

use sipwise_core::{
    CandidateScorer, Drink, DrinkId, DrinkQuery, Explanation, Recommendation,
    RecommendationRequest, RecommendationResponse, RecommendationStore, Recommender,
    ScoringWeights, StrategyLabel, UserId, WeightsError,
};
use sipwise_explain::ExplanationGenerator;
use sipwise_scorer::{
    CollaborativeScorer, ComputeError, ContentScorer, FeedbackAdjuster, TasteScorer, rank,
};

use crate::{candidate_pool, load_signals, select_pool};

/// Sweetness distance within which two drinks count as similar.
pub const SIMILAR_SWEETNESS_SPAN: u8 = 2;

/// Score attached to drink-to-drink similarity results, which are not
/// personalised.
pub const SIMILARITY_SCORE: f32 = 0.5;

/// Recommender combining content, collaborative and taste strategies.
///
/// Every request loads the requester's signals once, selects a bounded
/// candidate pool, lets the three strategies score it independently,
/// rescales the scores from feedback and ratings, ranks the merged list
/// and explains each survivor. Collaborator failures shrink the affected
/// phase to nothing; a fault while ranking yields an empty response.
///
/// The requested strategy label is reported back and steers the
/// explanations; every strategy runs regardless.
///
/// # Examples
/// ```
/// use sipwise_core::{
///     Drink, DrinkId, PreferenceProfile, PriceTier, RecommendationRequest, Recommender,
///     UserId, test_support::MemoryStore,
/// };
/// use sipwise_hybrid::HybridRecommender;
///
/// let store = MemoryStore::with_drinks([
///     Drink::new(DrinkId(1), "Flat White", "coffee", PriceTier::Standard),
/// ])
/// .with_profile(UserId(1), PreferenceProfile::default());
/// let recommender = HybridRecommender::new(store);
/// let response = recommender.recommend(UserId(1), &RecommendationRequest::default(), false);
/// assert_eq!(response.total_count, 1);
/// ```
#[derive(Debug)]
pub struct HybridRecommender<S> {
    store: S,
    weights: ScoringWeights,
}

impl<S> HybridRecommender<S>
where
    S: RecommendationStore,
{
    /// Construct a recommender with the default weight profile.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            weights: ScoringWeights::default(),
        }
    }

    /// Construct a recommender with an explicit weight profile.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the profile fails validation.
    pub fn with_weights(store: S, weights: ScoringWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            store,
            weights: weights.validate()?,
        })
    }

    /// The weight profile in use.
    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// The collaborator store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run the pipeline, surfacing ranking faults instead of containing
    /// them.
    ///
    /// # Errors
    /// Returns [`ComputeError`] when a strategy produced a non-finite score.
    pub fn try_recommend(
        &self,
        user: UserId,
        request: &RecommendationRequest,
        age_verified: bool,
    ) -> Result<RecommendationResponse, ComputeError> {
        let label = request.label();
        let signals = load_signals(&self.store, user);
        let pool = candidate_pool(&self.store, &signals, age_verified);
        log::debug!("selected {} candidates for {user}", pool.len());

        let content = ContentScorer::new(self.weights.content);
        let collaborative =
            CollaborativeScorer::with_weights(&self.store, self.weights.collaborative);
        let taste = TasteScorer::new(self.weights.taste);
        let strategies: [&dyn CandidateScorer; 3] = [&content, &collaborative, &taste];
        let scored = strategies
            .iter()
            .flat_map(|strategy| {
                let candidates = strategy.score(&pool, &signals);
                log::debug!("{} scored {} candidates", strategy.tag(), candidates.len());
                candidates
            })
            .collect();

        let adjusted = FeedbackAdjuster::new(self.weights.feedback).adjust(scored, &signals);
        let ranking = rank(adjusted, request.limit())?;

        let generator = ExplanationGenerator::new(&self.store);
        let recommendations = ranking
            .candidates
            .into_iter()
            .map(|candidate| Recommendation {
                explanation: generator.explain_with(
                    &signals,
                    &candidate.drink,
                    candidate.score,
                    label,
                ),
                strategy: StrategyLabel::from_tag(candidate.strategy),
                score: candidate.score,
                drink: candidate.drink,
            })
            .collect();

        Ok(RecommendationResponse {
            recommendations,
            total_count: ranking.total_count,
            strategy: label,
        })
    }

    /// Drinks resembling `drink` for `user`.
    ///
    /// A drink is similar when it shares the category and price tier of
    /// `drink` and its sweetness lies within two levels. Results keep
    /// catalog order, exclude `drink` itself, and are explained with the
    /// `content` label at a neutral score. An unknown drink or a failed
    /// catalog read yields an empty list.
    #[must_use]
    pub fn similar_drinks(&self, user: UserId, drink: DrinkId, limit: usize) -> Vec<Recommendation> {
        let base = match self.store.drink(drink) {
            Ok(Some(found)) => found,
            Ok(None) => {
                log::debug!("no similar drinks for unknown {drink}");
                return Vec::new();
            }
            Err(err) => {
                log::warn!("similar drinks for {drink} unavailable: {err}");
                return Vec::new();
            }
        };

        let similar = select_pool(&self.store, &similarity_query(&base, limit));
        let generator = ExplanationGenerator::new(&self.store);
        similar
            .into_iter()
            .map(|candidate| Recommendation {
                explanation: generator.explain(
                    user,
                    &candidate,
                    SIMILARITY_SCORE,
                    StrategyLabel::Content,
                ),
                strategy: StrategyLabel::Content,
                score: SIMILARITY_SCORE,
                drink: candidate,
            })
            .collect()
    }
}

fn similarity_query(base: &Drink, limit: usize) -> DrinkQuery {
    DrinkQuery::new()
        .with_category(base.category.clone())
        .with_price_tier(base.price_tier)
        .with_sweetness_between(
            base.sweetness.saturating_sub(SIMILAR_SWEETNESS_SPAN),
            base.sweetness.saturating_add(SIMILAR_SWEETNESS_SPAN),
        )
        .excluding(base.id)
        .with_limit(limit)
}

impl<S> Recommender for HybridRecommender<S>
where
    S: RecommendationStore,
{
    fn recommend(
        &self,
        user: UserId,
        request: &RecommendationRequest,
        age_verified: bool,
    ) -> RecommendationResponse {
        self.try_recommend(user, request, age_verified)
            .unwrap_or_else(|err| {
                log::error!("recommendation for {user} failed: {err}");
                RecommendationResponse::empty(request.label())
            })
    }

    fn explain(
        &self,
        user: UserId,
        drink: &Drink,
        score: f32,
        label: StrategyLabel,
    ) -> Explanation {
        ExplanationGenerator::new(&self.store).explain(user, drink, score, label)
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        clippy::float_arithmetic,
        reason = "tests assert on known fixtures"
    )]

    use super::*;
    use rstest::{fixture, rstest};
    use sipwise_core::{
        CollaborativeWeights, ContentWeights, FALLBACK_REASON, Feedback, FeedbackKind,
        Interaction, PreferenceProfile, PriceTier, StoreArea, TasteLevel,
        test_support::MemoryStore,
    };

    const USER: UserId = UserId(1);
    const PEER: UserId = UserId(2);

    fn level(value: u8) -> TasteLevel {
        TasteLevel::new(value).expect("valid level")
    }

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::with_drinks([
            Drink::new(DrinkId(1), "Iced Tea", "tea", PriceTier::Standard)
                .with_caffeine_mg(100)
                .with_sugar_g(10.0),
            Drink::new(DrinkId(2), "Frappe", "coffee", PriceTier::Premium)
                .with_sweetness(level(9))
                .with_caffeine_mg(450)
                .with_sugar_g(60.0),
            Drink::new(DrinkId(3), "Spritz", "cocktail", PriceTier::Standard)
                .with_alcohol_percent(11.0),
            Drink::new(DrinkId(4), "Green Tea", "tea", PriceTier::Standard)
                .with_sweetness(level(3)),
            Drink::new(DrinkId(5), "Oolong", "tea", PriceTier::Standard)
                .with_sweetness(level(8)),
        ])
        .with_profile(USER, PreferenceProfile::default())
    }

    fn ids(response: &RecommendationResponse) -> Vec<u64> {
        response
            .recommendations
            .iter()
            .map(|r| r.drink.id.get())
            .collect()
    }

    #[rstest]
    fn content_scores_drive_the_ranking(store: MemoryStore) {
        let response = HybridRecommender::new(store).recommend(
            USER,
            &RecommendationRequest::default(),
            false,
        );
        assert_eq!(response.strategy, StrategyLabel::Hybrid);
        assert_eq!(response.total_count, 4);
        let first = response.recommendations.first().expect("one result");
        assert_eq!(first.drink.id, DrinkId(1));
        assert!((first.score - 0.9).abs() < 1e-6);
        assert_eq!(first.strategy, StrategyLabel::Content);
        assert!(!ids(&response).contains(&3));
    }

    #[rstest]
    fn limit_truncates_but_keeps_total(store: MemoryStore) {
        let request = RecommendationRequest::new(2).expect("valid limit");
        let response = HybridRecommender::new(store).recommend(USER, &request, true);
        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.total_count, 5);
    }

    #[rstest]
    fn dismissed_drinks_are_never_recommended(store: MemoryStore) {
        let seeded = store.with_feedback(Feedback::new(USER, DrinkId(1), FeedbackKind::NotForMe));
        let response =
            HybridRecommender::new(seeded).recommend(USER, &RecommendationRequest::default(), true);
        assert!(!ids(&response).contains(&1));
    }

    #[rstest]
    fn unreadable_interactions_never_resurface_dismissed_drinks(store: MemoryStore) {
        let seeded = store
            .with_interaction(Interaction::new(USER, DrinkId(1)).not_for_me())
            .with_failure(StoreArea::Interactions);
        let response =
            HybridRecommender::new(seeded).recommend(USER, &RecommendationRequest::default(), false);
        assert!(!ids(&response).contains(&1));
        assert_eq!(response.total_count, 0);
    }

    #[rstest]
    fn unreadable_feedback_never_resurfaces_dismissed_drinks(store: MemoryStore) {
        let seeded = store
            .with_feedback(Feedback::new(USER, DrinkId(1), FeedbackKind::NotForMe))
            .with_failure(StoreArea::Feedback);
        let response =
            HybridRecommender::new(seeded).recommend(USER, &RecommendationRequest::default(), false);
        assert!(!ids(&response).contains(&1));
        assert_eq!(response.total_count, 0);
    }

    #[rstest]
    fn collaborative_picks_survive_without_a_profile() {
        let store = MemoryStore::with_drinks([
            Drink::new(DrinkId(1), "Iced Tea", "tea", PriceTier::Standard),
            Drink::new(DrinkId(2), "Kombucha", "tea", PriceTier::Standard),
        ])
        .with_interaction(Interaction::new(USER, DrinkId(1)))
        .with_interaction(Interaction::new(PEER, DrinkId(1)).favorite())
        .with_interaction(Interaction::new(PEER, DrinkId(2)).favorite());
        let response =
            HybridRecommender::new(store).recommend(USER, &RecommendationRequest::default(), false);
        assert_eq!(ids(&response), vec![1, 2]);
        assert!(
            response
                .recommendations
                .iter()
                .all(|r| r.strategy == StrategyLabel::Collaborative && (r.score - 0.7).abs() < 1e-6)
        );
    }

    #[rstest]
    fn non_finite_weights_surface_as_empty_responses(store: MemoryStore) {
        let weights = ScoringWeights {
            content: ContentWeights {
                popularity: f32::INFINITY,
                ..ContentWeights::default()
            },
            ..ScoringWeights::default()
        };
        assert!(HybridRecommender::with_weights(store.clone(), weights).is_err());

        let unchecked = HybridRecommender { store, weights };
        let request = RecommendationRequest::default().with_strategy(StrategyLabel::Content);
        assert!(unchecked.try_recommend(USER, &request, false).is_err());
        assert_eq!(
            unchecked.recommend(USER, &request, false),
            RecommendationResponse::empty(StrategyLabel::Content)
        );
    }

    #[rstest]
    fn catalog_failure_degrades_to_empty(store: MemoryStore) {
        let failing = store.with_failure(StoreArea::Catalog);
        let response =
            HybridRecommender::new(failing).recommend(USER, &RecommendationRequest::default(), false);
        assert!(response.recommendations.is_empty());
        assert_eq!(response.total_count, 0);
    }

    #[rstest]
    fn explanation_failures_do_not_block_results(store: MemoryStore) {
        let failing = store.with_failure(StoreArea::Quiz);
        let response =
            HybridRecommender::new(failing).recommend(USER, &RecommendationRequest::default(), false);
        assert_eq!(response.total_count, 4);
        assert!(
            response
                .recommendations
                .iter()
                .all(|r| r.explanation.reasons() == [FALLBACK_REASON])
        );
    }

    #[rstest]
    fn custom_weights_change_scores(store: MemoryStore) {
        let weights = ScoringWeights {
            collaborative: CollaborativeWeights {
                base_score: 0.5,
                ..CollaborativeWeights::default()
            },
            content: ContentWeights {
                popularity: 0.0,
                ..ContentWeights::default()
            },
            ..ScoringWeights::default()
        };
        let recommender = HybridRecommender::with_weights(store, weights).expect("valid weights");
        let response = recommender.recommend(USER, &RecommendationRequest::default(), false);
        let first = response.recommendations.first().expect("one result");
        assert!((first.score - 0.8).abs() < 1e-6);
    }

    #[rstest]
    fn similar_drinks_share_category_tier_and_sweetness(store: MemoryStore) {
        let recommender = HybridRecommender::new(store);
        let similar = recommender.similar_drinks(USER, DrinkId(1), 10);
        let found: Vec<_> = similar.iter().map(|r| r.drink.id.get()).collect();
        assert_eq!(found, vec![4]);
        let first = similar.first().expect("one similar drink");
        assert_eq!(first.strategy, StrategyLabel::Content);
        assert!((first.score - SIMILARITY_SCORE).abs() < f32::EPSILON);
        assert!((1..=3).contains(&first.explanation.len()));
    }

    #[rstest]
    fn similar_drinks_of_unknown_or_unreadable_drinks_are_empty(store: MemoryStore) {
        let recommender = HybridRecommender::new(store.clone());
        assert!(recommender.similar_drinks(USER, DrinkId(99), 10).is_empty());
        let failing = HybridRecommender::new(store.with_failure(StoreArea::Catalog));
        assert!(failing.similar_drinks(USER, DrinkId(1), 10).is_empty());
    }

    #[rstest]
    fn explain_delegates_to_the_generator(store: MemoryStore) {
        let drink = Drink::new(DrinkId(1), "Iced Tea", "tea", PriceTier::Standard);
        let explanation =
            HybridRecommender::new(store).explain(USER, &drink, 0.9, StrategyLabel::Content);
        assert_eq!(
            explanation.reasons().first().map(String::as_str),
            Some("Matches your preferred sweetness level (5/10)")
        );
    }
}
