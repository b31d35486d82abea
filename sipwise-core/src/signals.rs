//! Per-request snapshot of everything known about the requester.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    ActiveFilter, DrinkId, Feedback, FeedbackKind, Interaction, PreferenceProfile, StoreArea,
    UserId,
};

/// Requester state loaded once per request and shared by every phase.
///
/// Missing data is represented by empty collections or `None`. Areas whose
/// read failed are recorded in `unavailable` so callers can tell a failure
/// apart from absence where it matters.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSignals {
    /// The requester.
    pub user: UserId,
    /// Explicit preference profile, when one exists.
    pub profile: Option<PreferenceProfile>,
    /// Active browsing filter, when one is switched on.
    pub filter: Option<ActiveFilter>,
    /// Interaction records keyed by drink.
    pub interactions: BTreeMap<DrinkId, Interaction>,
    /// Feedback kinds left per drink.
    pub feedback: BTreeMap<DrinkId, BTreeSet<FeedbackKind>>,
    /// Areas that could not be read for this request.
    pub unavailable: BTreeSet<StoreArea>,
}

impl UserSignals {
    /// Signals for a user with no recorded state.
    #[must_use]
    pub const fn empty(user: UserId) -> Self {
        Self {
            user,
            profile: None,
            filter: None,
            interactions: BTreeMap::new(),
            feedback: BTreeMap::new(),
            unavailable: BTreeSet::new(),
        }
    }

    /// Attach a preference profile.
    #[must_use]
    pub fn with_profile(mut self, profile: PreferenceProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Attach an active filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ActiveFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add interaction records, keeping the last one per drink.
    #[must_use]
    pub fn with_interactions<I>(mut self, interactions: I) -> Self
    where
        I: IntoIterator<Item = Interaction>,
    {
        self.interactions
            .extend(interactions.into_iter().map(|i| (i.drink_id, i)));
        self
    }

    /// Add feedback records, grouping kinds by drink.
    #[must_use]
    pub fn with_feedback<I>(mut self, feedback: I) -> Self
    where
        I: IntoIterator<Item = Feedback>,
    {
        for record in feedback {
            self.feedback
                .entry(record.drink_id)
                .or_default()
                .insert(record.kind);
        }
        self
    }

    /// Record that `area` failed to load.
    #[must_use]
    pub fn with_unavailable(mut self, area: StoreArea) -> Self {
        self.unavailable.insert(area);
        self
    }

    /// Whether the full set of dismissed drinks is known.
    ///
    /// False when either the interaction or the feedback read failed, in
    /// which case [`Self::not_for_me_drinks`] may be incomplete.
    #[must_use]
    pub fn dismissals_known(&self) -> bool {
        !(self.unavailable.contains(&StoreArea::Interactions)
            || self.unavailable.contains(&StoreArea::Feedback))
    }

    /// Interaction record for `drink`.
    #[must_use]
    pub fn interaction(&self, drink: DrinkId) -> Option<&Interaction> {
        self.interactions.get(&drink)
    }

    /// Whether `drink` is a favourite.
    #[must_use]
    pub fn is_favorite(&self, drink: DrinkId) -> bool {
        self.interaction(drink).is_some_and(|i| i.is_favorite)
    }

    /// Rating of `drink`, `0.0` when unrated or unknown.
    #[must_use]
    pub fn rating(&self, drink: DrinkId) -> f32 {
        self.interaction(drink).map_or(0.0, |i| i.rating)
    }

    /// Whether feedback of `kind` exists for `drink`.
    #[must_use]
    pub fn has_feedback(&self, drink: DrinkId, kind: FeedbackKind) -> bool {
        self.feedback
            .get(&drink)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Whether the user dismissed `drink` through either the interaction
    /// flag or `not_for_me` feedback.
    #[must_use]
    pub fn is_marked_not_for_me(&self, drink: DrinkId) -> bool {
        self.interaction(drink).is_some_and(|i| i.is_not_for_me)
            || self.has_feedback(drink, FeedbackKind::NotForMe)
    }

    /// Every drink the user dismissed.
    #[must_use]
    pub fn not_for_me_drinks(&self) -> BTreeSet<DrinkId> {
        self.interactions
            .keys()
            .chain(self.feedback.keys())
            .copied()
            .filter(|id| self.is_marked_not_for_me(*id))
            .collect()
    }

    /// Drinks the user has any interaction record with.
    #[must_use]
    pub fn interacted_drinks(&self) -> BTreeSet<DrinkId> {
        self.interactions.keys().copied().collect()
    }

    /// Drinks the user favourited.
    #[must_use]
    pub fn favorites(&self) -> BTreeSet<DrinkId> {
        self.interactions
            .values()
            .filter(|i| i.is_favorite)
            .map(|i| i.drink_id)
            .collect()
    }
}
