//! Candidate pool selection.

use sipwise_core::{CANDIDATE_POOL_LIMIT, CatalogReader, Drink, DrinkQuery, UserSignals};

/// Build the catalog predicate for one request.
///
/// Alcoholic drinks are excluded unless the caller verified the
/// requester's age, the active filter narrows tier, sweetness and
/// caffeine, and every drink the requester dismissed is excluded by id.
/// Excluded ingredients and categories on the filter are not applied.
///
/// # Examples
/// ```
/// use sipwise_core::{DrinkId, Interaction, UserId, UserSignals};
/// use sipwise_hybrid::pool_query;
///
/// let signals = UserSignals::empty(UserId(1))
///     .with_interactions([Interaction::new(UserId(1), DrinkId(3)).not_for_me()]);
/// let query = pool_query(&signals, false);
/// assert!(query.exclude_alcoholic);
/// assert!(query.excluded_ids.contains(&DrinkId(3)));
/// ```
#[must_use]
pub fn pool_query(signals: &UserSignals, age_verified: bool) -> DrinkQuery {
    let mut query = DrinkQuery::new()
        .with_limit(CANDIDATE_POOL_LIMIT)
        .excluding_all(signals.not_for_me_drinks());
    if !age_verified {
        query = query.excluding_alcoholic();
    }
    if let Some(filter) = signals.filter.as_ref() {
        query = query.constrained_by(filter);
    }
    query
}

/// Select the candidate pool for a request.
///
/// The pool is empty when the requester's dismissals could not be read,
/// since the exclusion list would otherwise be incomplete.
#[must_use]
pub fn candidate_pool<S>(store: &S, signals: &UserSignals, age_verified: bool) -> Vec<Drink>
where
    S: CatalogReader + ?Sized,
{
    if !signals.dismissals_known() {
        log::warn!(
            "candidate selection for {} degraded to an empty pool: dismissals unavailable",
            signals.user
        );
        return Vec::new();
    }
    select_pool(store, &pool_query(signals, age_verified))
}

/// Read the pool matching `query`, treating a failed read as empty.
#[must_use]
pub fn select_pool<S>(store: &S, query: &DrinkQuery) -> Vec<Drink>
where
    S: CatalogReader + ?Sized,
{
    store.drinks_matching(query).unwrap_or_else(|err| {
        log::warn!("candidate selection degraded to an empty pool: {err}");
        Vec::new()
    })
}
