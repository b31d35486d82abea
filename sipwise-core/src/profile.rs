//! Per-user preference profiles and active catalog filters.
//!
//! A profile carries the explicit numeric preferences the scorers compare
//! drinks against. The time-sensitivity and mode maps are opaque to the
//! engine: only their presence is observed.

use std::collections::{BTreeMap, BTreeSet};

use crate::{PriceTier, TasteLevel};

/// Explicit taste and nutrition preferences of a user.
///
/// `Default` yields the values a profile is lazily created with.
///
/// # Examples
/// ```
/// use sipwise_core::{PreferenceProfile, PriceTier};
///
/// let profile = PreferenceProfile::default()
///     .with_preferred_category("tea")
///     .with_caffeine_limit_mg(200);
/// assert_eq!(profile.preferred_price_tier, PriceTier::Standard);
/// assert!(profile.prefers_category("tea"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreferenceProfile {
    /// Preferred sweetness.
    pub sweetness: TasteLevel,
    /// Preferred bitterness.
    pub bitterness: TasteLevel,
    /// Daily caffeine ceiling in milligrams.
    pub caffeine_limit_mg: u32,
    /// Daily sugar ceiling in grams.
    pub sugar_limit_g: f32,
    /// Daily calorie ceiling.
    pub calorie_limit: u32,
    /// Preferred price band.
    pub preferred_price_tier: PriceTier,
    /// Categories the user likes.
    pub preferred_categories: BTreeSet<String>,
    /// Opaque time-of-day rules keyed by rule name.
    pub time_sensitivity: BTreeMap<String, String>,
    /// Opaque mode flags such as `decaf` or `energy`.
    pub mode_preferences: BTreeMap<String, bool>,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            sweetness: TasteLevel::NEUTRAL,
            bitterness: TasteLevel::NEUTRAL,
            caffeine_limit_mg: 400,
            sugar_limit_g: 50.0,
            calorie_limit: 2000,
            preferred_price_tier: PriceTier::Standard,
            preferred_categories: BTreeSet::new(),
            time_sensitivity: BTreeMap::new(),
            mode_preferences: BTreeMap::new(),
        }
    }
}

impl PreferenceProfile {
    /// Set the preferred sweetness.
    #[must_use]
    pub const fn with_sweetness(mut self, sweetness: TasteLevel) -> Self {
        self.sweetness = sweetness;
        self
    }

    /// Set the preferred bitterness.
    #[must_use]
    pub const fn with_bitterness(mut self, bitterness: TasteLevel) -> Self {
        self.bitterness = bitterness;
        self
    }

    /// Set the caffeine ceiling.
    #[must_use]
    pub const fn with_caffeine_limit_mg(mut self, limit: u32) -> Self {
        self.caffeine_limit_mg = limit;
        self
    }

    /// Set the sugar ceiling.
    #[must_use]
    pub const fn with_sugar_limit_g(mut self, limit: f32) -> Self {
        self.sugar_limit_g = limit;
        self
    }

    /// Set the preferred price band.
    #[must_use]
    pub const fn with_price_tier(mut self, tier: PriceTier) -> Self {
        self.preferred_price_tier = tier;
        self
    }

    /// Add a preferred category.
    #[must_use]
    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.preferred_categories.insert(category.into());
        self
    }

    /// Add a time-sensitivity rule.
    #[must_use]
    pub fn with_time_rule(mut self, key: impl Into<String>, effect: impl Into<String>) -> Self {
        self.time_sensitivity.insert(key.into(), effect.into());
        self
    }

    /// Add a mode preference flag.
    #[must_use]
    pub fn with_mode(mut self, key: impl Into<String>, enabled: bool) -> Self {
        self.mode_preferences.insert(key.into(), enabled);
        self
    }

    /// Whether `category` is among the preferred categories.
    #[must_use]
    pub fn prefers_category(&self, category: &str) -> bool {
        self.preferred_categories.contains(category)
    }
}

/// Constraints a user has switched on for browsing.
///
/// Unset bounds do not constrain anything. Excluded ingredients and
/// categories are recorded for the catalog UI; candidate selection only
/// honours the tier, sweetness and caffeine bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActiveFilter {
    /// Required price band.
    pub budget_tier: Option<PriceTier>,
    /// Highest acceptable sweetness.
    pub max_sweetness: Option<TasteLevel>,
    /// Lowest acceptable caffeine in milligrams.
    pub caffeine_min_mg: Option<u32>,
    /// Highest acceptable caffeine in milligrams.
    pub caffeine_max_mg: Option<u32>,
    /// Ingredients the user wants to avoid.
    pub excluded_ingredients: BTreeSet<String>,
    /// Categories the user wants to avoid.
    pub excluded_categories: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_lazy_profile() {
        let profile = PreferenceProfile::default();
        assert_eq!(profile.sweetness.get(), 5);
        assert_eq!(profile.bitterness.get(), 5);
        assert_eq!(profile.caffeine_limit_mg, 400);
        assert_eq!(profile.calorie_limit, 2000);
        assert_eq!(profile.preferred_price_tier, PriceTier::Standard);
        assert!(profile.preferred_categories.is_empty());
    }

    #[rstest]
    fn builders_populate_opaque_maps() {
        let profile = PreferenceProfile::default()
            .with_time_rule("morning", "caffeinated")
            .with_mode("decaf", true);
        assert_eq!(
            profile.time_sensitivity.get("morning").map(String::as_str),
            Some("caffeinated")
        );
        assert_eq!(profile.mode_preferences.get("decaf"), Some(&true));
    }
}
