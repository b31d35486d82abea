//! Catalog predicate used to select the candidate pool.

use std::collections::BTreeSet;

use crate::{ActiveFilter, Drink, DrinkId, PriceTier, TasteLevel};

/// Upper bound on the number of drinks a candidate pool may hold.
pub const CANDIDATE_POOL_LIMIT: usize = 100;

/// Conjunctive predicate over catalog drinks.
///
/// Every populated field narrows the result; unset fields match everything.
/// Catalog readers evaluate the predicate and return at most
/// [`DrinkQuery::limit`] drinks in catalog order.
///
/// # Examples
/// ```
/// use sipwise_core::{Drink, DrinkId, DrinkQuery, PriceTier};
///
/// let query = DrinkQuery::new().excluding_alcoholic();
/// let wine = Drink::new(DrinkId(1), "Merlot", "wine", PriceTier::Premium)
///     .with_alcohol_percent(13.5);
/// assert!(!query.matches(&wine));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkQuery {
    /// Reject alcoholic drinks.
    pub exclude_alcoholic: bool,
    /// Required price tier.
    pub price_tier: Option<PriceTier>,
    /// Required category.
    pub category: Option<String>,
    /// Lowest acceptable sweetness.
    pub min_sweetness: Option<TasteLevel>,
    /// Highest acceptable sweetness.
    pub max_sweetness: Option<TasteLevel>,
    /// Lowest acceptable caffeine.
    pub caffeine_min_mg: Option<u32>,
    /// Highest acceptable caffeine.
    pub caffeine_max_mg: Option<u32>,
    /// Drinks that must not be returned.
    pub excluded_ids: BTreeSet<DrinkId>,
    /// Maximum number of drinks to return.
    pub limit: usize,
}

impl Default for DrinkQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl DrinkQuery {
    /// Match every drink, capped at [`CANDIDATE_POOL_LIMIT`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exclude_alcoholic: false,
            price_tier: None,
            category: None,
            min_sweetness: None,
            max_sweetness: None,
            caffeine_min_mg: None,
            caffeine_max_mg: None,
            excluded_ids: BTreeSet::new(),
            limit: CANDIDATE_POOL_LIMIT,
        }
    }

    /// Reject alcoholic drinks.
    #[must_use]
    pub const fn excluding_alcoholic(mut self) -> Self {
        self.exclude_alcoholic = true;
        self
    }

    /// Require an exact price tier.
    #[must_use]
    pub const fn with_price_tier(mut self, tier: PriceTier) -> Self {
        self.price_tier = Some(tier);
        self
    }

    /// Require an exact category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict sweetness to `min..=max`.
    #[must_use]
    pub const fn with_sweetness_between(mut self, min: TasteLevel, max: TasteLevel) -> Self {
        self.min_sweetness = Some(min);
        self.max_sweetness = Some(max);
        self
    }

    /// Exclude a drink by id.
    #[must_use]
    pub fn excluding(mut self, id: DrinkId) -> Self {
        self.excluded_ids.insert(id);
        self
    }

    /// Exclude several drinks by id.
    #[must_use]
    pub fn excluding_all<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = DrinkId>,
    {
        self.excluded_ids.extend(ids);
        self
    }

    /// Cap the number of returned drinks.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Narrow the query by the tier, sweetness and caffeine bounds of an
    /// active filter.
    #[must_use]
    pub fn constrained_by(mut self, filter: &ActiveFilter) -> Self {
        if let Some(tier) = filter.budget_tier {
            self.price_tier = Some(tier);
        }
        if let Some(max) = filter.max_sweetness {
            self.max_sweetness = Some(max);
        }
        if let Some(min) = filter.caffeine_min_mg {
            self.caffeine_min_mg = Some(min);
        }
        if let Some(max) = filter.caffeine_max_mg {
            self.caffeine_max_mg = Some(max);
        }
        self
    }

    /// Evaluate the predicate against a single drink. The limit is ignored.
    #[must_use]
    pub fn matches(&self, drink: &Drink) -> bool {
        if self.exclude_alcoholic && drink.is_alcoholic() {
            return false;
        }
        if self.excluded_ids.contains(&drink.id) {
            return false;
        }
        if self.price_tier.is_some_and(|tier| tier != drink.price_tier) {
            return false;
        }
        if self
            .category
            .as_deref()
            .is_some_and(|category| category != drink.category)
        {
            return false;
        }
        if self.min_sweetness.is_some_and(|min| drink.sweetness < min)
            || self.max_sweetness.is_some_and(|max| drink.sweetness > max)
        {
            return false;
        }
        !(self.caffeine_min_mg.is_some_and(|min| drink.caffeine_mg < min)
            || self.caffeine_max_mg.is_some_and(|max| drink.caffeine_mg > max))
    }

    /// Apply the predicate and the limit to an in-memory catalog.
    pub fn select<'a, I>(&self, drinks: I) -> Vec<Drink>
    where
        I: IntoIterator<Item = &'a Drink>,
    {
        drinks
            .into_iter()
            .filter(|drink| self.matches(drink))
            .take(self.limit)
            .cloned()
            .collect()
    }
}
