//! Deduplication and final ranking of scored candidates.

use std::collections::BTreeSet;

use sipwise_core::ScoredCandidate;

use crate::ComputeError;

/// Deduplicated, ranked and truncated candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Candidates in rank order, at most the requested limit.
    pub candidates: Vec<ScoredCandidate>,
    /// Unique candidates before truncation.
    pub total_count: usize,
}

/// Merge strategy outputs into one ranked list of at most `limit` entries.
///
/// Candidates are first stably grouped by strategy priority (content,
/// collaborative, taste), then only the first candidate per drink is kept;
/// later duplicates are discarded without merging scores or reasons. The
/// survivors are stably sorted by descending score and truncated.
///
/// # Errors
/// Returns [`ComputeError::NonFiniteScore`] when any candidate carries a
/// NaN or infinite score.
///
/// # Examples
/// ```
/// use sipwise_core::{Drink, DrinkId, PriceTier, ScoredCandidate, StrategyTag};
/// use sipwise_scorer::rank;
///
/// let drink = Drink::new(DrinkId(1), "Latte", "coffee", PriceTier::Standard);
/// let candidates = vec![
///     ScoredCandidate::new(drink.clone(), 0.7, StrategyTag::Collaborative),
///     ScoredCandidate::new(drink, 0.4, StrategyTag::Content),
/// ];
/// let ranking = rank(candidates, 10).expect("finite scores");
/// assert_eq!(ranking.total_count, 1);
/// assert_eq!(ranking.candidates.first().map(|c| c.strategy), Some(StrategyTag::Content));
/// ```
pub fn rank(
    mut candidates: Vec<ScoredCandidate>,
    limit: usize,
) -> Result<Ranking, ComputeError> {
    if let Some(bad) = candidates.iter().find(|c| !c.score.is_finite()) {
        return Err(ComputeError::NonFiniteScore {
            drink: bad.drink.id,
            strategy: bad.strategy,
            score: bad.score,
        });
    }

    candidates.sort_by_key(|c| c.strategy.priority());

    let mut seen = BTreeSet::new();
    candidates.retain(|c| seen.insert(c.drink.id));
    let total_count = candidates.len();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(limit);

    log::debug!(
        "ranked {total_count} unique candidates, kept {}",
        candidates.len()
    );
    Ok(Ranking {
        candidates,
        total_count,
    })
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        clippy::float_arithmetic,
        reason = "tests assert on known fixtures"
    )]

    use super::*;
    use rstest::rstest;
    use sipwise_core::{Drink, DrinkId, PriceTier, StrategyTag};

    fn candidate(id: u64, score: f32, strategy: StrategyTag) -> ScoredCandidate {
        let drink = Drink::new(DrinkId(id), format!("Drink {id}"), "tea", PriceTier::Budget);
        ScoredCandidate::new(drink, score, strategy)
    }

    fn ids(ranking: &Ranking) -> Vec<u64> {
        ranking.candidates.iter().map(|c| c.drink.id.get()).collect()
    }

    #[rstest]
    fn content_wins_over_higher_collaborative_duplicate() {
        let ranking = rank(
            vec![
                candidate(1, 0.9, StrategyTag::Content),
                candidate(1, 0.7, StrategyTag::Collaborative),
                candidate(1, 0.95, StrategyTag::Taste),
            ],
            10,
        )
        .expect("finite");
        assert_eq!(ranking.total_count, 1);
        let first = ranking.candidates.first().expect("one result");
        assert!((first.score - 0.9).abs() < 1e-6);
        assert_eq!(first.strategy, StrategyTag::Content);
    }

    #[rstest]
    fn strategy_order_is_enforced_before_dedup() {
        let ranking = rank(
            vec![
                candidate(2, 0.3, StrategyTag::Taste),
                candidate(2, 0.1, StrategyTag::Content),
            ],
            10,
        )
        .expect("finite");
        assert_eq!(
            ranking.candidates.first().map(|c| c.strategy),
            Some(StrategyTag::Content)
        );
    }

    #[rstest]
    fn ties_keep_merge_order() {
        let ranking = rank(
            vec![
                candidate(3, 0.5, StrategyTag::Content),
                candidate(1, 0.5, StrategyTag::Content),
                candidate(2, 0.5, StrategyTag::Collaborative),
            ],
            10,
        )
        .expect("finite");
        assert_eq!(ids(&ranking), vec![3, 1, 2]);
    }

    #[rstest]
    fn truncation_keeps_pre_truncation_count() {
        let candidates = (1..=6)
            .map(|id| candidate(id, 0.1, StrategyTag::Content))
            .collect();
        let ranking = rank(candidates, 4).expect("finite");
        assert_eq!(ranking.candidates.len(), 4);
        assert_eq!(ranking.total_count, 6);
    }

    #[rstest]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn non_finite_scores_are_compute_errors(#[case] score: f32) {
        let err = rank(vec![candidate(4, score, StrategyTag::Taste)], 10).expect_err("non-finite");
        assert!(matches!(err, ComputeError::NonFiniteScore { drink: DrinkId(4), .. }));
    }

    #[rstest]
    fn empty_input_ranks_to_nothing() {
        let ranking = rank(Vec::new(), 10).expect("finite");
        assert!(ranking.candidates.is_empty());
        assert_eq!(ranking.total_count, 0);
    }
}
