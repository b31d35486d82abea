//! Collaborative scoring from the favourites of similar users.
//!
//! A user counts as "similar" when they favourited at least one drink the
//! requester has any interaction record with. The proxy is deliberately
//! coarse: a single shared favourite is enough.

use sipwise_core::{
    CandidateScorer, CollaborativeWeights, Drink, InteractionStore, ScoredCandidate, StrategyTag,
    UserSignals,
};

const COLLABORATIVE_REASON: &str = "Users with similar taste also liked this";

/// Scores pooled drinks favourited by similar users.
///
/// Reads go through the borrowed [`InteractionStore`]; a failed read is
/// logged and yields no candidates.
#[derive(Debug)]
pub struct CollaborativeScorer<'a, S: ?Sized> {
    store: &'a S,
    weights: CollaborativeWeights,
}

impl<'a, S: InteractionStore + ?Sized> CollaborativeScorer<'a, S> {
    /// Construct a scorer with default weights.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self::with_weights(store, CollaborativeWeights::default())
    }

    /// Construct a scorer with explicit weights.
    #[must_use]
    pub const fn with_weights(store: &'a S, weights: CollaborativeWeights) -> Self {
        Self { store, weights }
    }
}

impl<S: InteractionStore + ?Sized> CandidateScorer for CollaborativeScorer<'_, S> {
    fn tag(&self) -> StrategyTag {
        StrategyTag::Collaborative
    }

    fn score(&self, pool: &[Drink], signals: &UserSignals) -> Vec<ScoredCandidate> {
        let interacted = signals.interacted_drinks();
        if interacted.is_empty() {
            return Vec::new();
        }

        let similar_users = match self.store.favorited_by_others(
            &interacted,
            signals.user,
            self.weights.similar_user_limit,
        ) {
            Ok(users) => users,
            Err(err) => {
                log::warn!("collaborative scoring skipped for {}: {err}", signals.user);
                return Vec::new();
            }
        };
        if similar_users.is_empty() {
            return Vec::new();
        }

        let liked = match self.store.favorites_of(&similar_users) {
            Ok(drinks) => drinks,
            Err(err) => {
                log::warn!("collaborative scoring skipped for {}: {err}", signals.user);
                return Vec::new();
            }
        };

        pool.iter()
            .filter(|drink| liked.contains(&drink.id))
            .map(|drink| {
                ScoredCandidate::new(drink.clone(), self.weights.base_score, self.tag())
                    .with_reason(COLLABORATIVE_REASON)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::indexing_slicing,
        clippy::float_arithmetic,
        reason = "tests assert on known fixtures"
    )]

    use super::*;
    use rstest::{fixture, rstest};
    use sipwise_core::{
        DrinkId, Interaction, PriceTier, StoreArea, UserId, test_support::MemoryStore,
    };

    const REQUESTER: UserId = UserId(1);

    fn drink(id: u64) -> Drink {
        Drink::new(DrinkId(id), format!("Drink {id}"), "coffee", PriceTier::Standard)
    }

    #[fixture]
    fn pool() -> Vec<Drink> {
        (1..=5).map(drink).collect()
    }

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::default()
            .with_interaction(Interaction::new(REQUESTER, DrinkId(1)))
            .with_interaction(Interaction::new(UserId(2), DrinkId(1)).favorite())
            .with_interaction(Interaction::new(UserId(2), DrinkId(4)).favorite())
            .with_interaction(Interaction::new(UserId(2), DrinkId(9)).favorite())
            .with_interaction(Interaction::new(UserId(3), DrinkId(2)).favorite())
    }

    fn signals(store: &MemoryStore) -> UserSignals {
        UserSignals::empty(REQUESTER)
            .with_interactions(store.interactions(REQUESTER).unwrap_or_default())
    }

    #[rstest]
    fn liked_drinks_intersect_pool_in_pool_order(store: MemoryStore, pool: Vec<Drink>) {
        let scored = CollaborativeScorer::new(&store).score(&pool, &signals(&store));
        let ids: Vec<_> = scored.iter().map(|c| c.drink.id).collect();
        assert_eq!(ids, vec![DrinkId(1), DrinkId(4)]);
        assert!((scored[0].score - 0.7).abs() < 1e-6);
        assert_eq!(scored[0].reasons, vec![COLLABORATIVE_REASON]);
        assert!(scored.iter().all(|c| c.strategy == StrategyTag::Collaborative));
    }

    #[rstest]
    fn no_history_means_no_candidates(store: MemoryStore, pool: Vec<Drink>) {
        let scored = CollaborativeScorer::new(&store).score(&pool, &UserSignals::empty(REQUESTER));
        assert!(scored.is_empty());
    }

    #[rstest]
    fn read_failure_degrades_to_empty(store: MemoryStore, pool: Vec<Drink>) {
        let history = signals(&store);
        let failing = store.with_failure(StoreArea::Interactions);
        assert!(CollaborativeScorer::new(&failing).score(&pool, &history).is_empty());
    }

    #[rstest]
    fn similar_user_limit_caps_the_proxy_set(store: MemoryStore, pool: Vec<Drink>) {
        let extended = store
            .with_interaction(Interaction::new(REQUESTER, DrinkId(2)))
            .with_interaction(Interaction::new(UserId(3), DrinkId(5)).favorite());
        let weights = CollaborativeWeights {
            similar_user_limit: 1,
            ..CollaborativeWeights::default()
        };
        let scored =
            CollaborativeScorer::with_weights(&extended, weights).score(&pool, &signals(&extended));
        let ids: Vec<_> = scored.iter().map(|c| c.drink.id).collect();
        assert_eq!(ids, vec![DrinkId(1), DrinkId(4)]);
    }
}
