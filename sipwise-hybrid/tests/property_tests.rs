//! Property-based tests for the hybrid pipeline.
//!
//! # Invariants tested
//!
//! - **Age gate:** without age verification no alcoholic drink is
//!   recommended.
//! - **Dismissal exclusion:** drinks the requester dismissed never appear.
//! - **Result bounds:** results never exceed the limit, `total_count` is
//!   at least the number of results, and drinks are unique.
//! - **Explanation bounds:** every explanation holds one to three reasons.
//! - **Ordering:** results are sorted by descending score.

#![expect(
    clippy::expect_used,
    reason = "property tests fail fast on invalid fixtures"
)]


use std::collections::BTreeSet;

use proptest::prelude::*;
use sipwise_core::{
    Drink, PreferenceProfile, RecommendationRequest, Recommender, UserId, UserSignals,
    test_support::MemoryStore,
};
use sipwise_hybrid::HybridRecommender;

use proptest_support::{History, catalog, history, maybe_profile};

const REQUESTER: UserId = UserId(1);
const PEER: UserId = UserId(2);

fn store_for(drinks: Vec<Drink>, profile: Option<PreferenceProfile>, history: &History) -> MemoryStore {
    let profiled = profile
        .into_iter()
        .fold(MemoryStore::with_drinks(drinks), |store, found| {
            store.with_profile(REQUESTER, found)
        });
    let interacted = history
        .interactions
        .iter()
        .cloned()
        .fold(profiled, MemoryStore::with_interaction);
    history
        .feedback
        .iter()
        .cloned()
        .fold(interacted, MemoryStore::with_feedback)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: every recommendation respects the request and the gates.
    #[test]
    fn recommendations_respect_gates_and_bounds(
        drinks in catalog(15),
        profile in maybe_profile(),
        past in history(REQUESTER, PEER, 15),
        limit in 1_usize..=50,
        age_verified in any::<bool>(),
    ) {
        let dismissed = UserSignals::empty(REQUESTER)
            .with_interactions(past.interactions.iter().filter(|i| i.user_id == REQUESTER).cloned())
            .with_feedback(past.feedback.iter().cloned())
            .not_for_me_drinks();
        let store = store_for(drinks, profile, &past);
        let request = RecommendationRequest::new(limit).expect("limit in range");
        let response = HybridRecommender::new(store).recommend(REQUESTER, &request, age_verified);

        prop_assert!(response.recommendations.len() <= limit);
        prop_assert!(response.total_count >= response.recommendations.len());

        let ids: BTreeSet<_> = response.recommendations.iter().map(|r| r.drink.id).collect();
        prop_assert_eq!(ids.len(), response.recommendations.len());
        prop_assert!(ids.is_disjoint(&dismissed));

        for recommendation in &response.recommendations {
            prop_assert!(age_verified || !recommendation.drink.is_alcoholic());
            prop_assert!((1..=3).contains(&recommendation.explanation.len()));
        }
        prop_assert!(response
            .recommendations
            .windows(2)
            .all(|pair| pair.first().map(|r| r.score) >= pair.get(1).map(|r| r.score)));
    }
}
