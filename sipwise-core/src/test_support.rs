//! Test-only, in-memory collaborator implementation used by unit and
//! behaviour tests across the workspace.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    ActiveFilter, CatalogReader, Drink, DrinkId, DrinkQuery, Feedback, FeedbackStore, Interaction,
    InteractionStore, PreferenceProfile, PreferenceStore, QuizAnswer, QuizStore, StoreArea,
    StoreError, UserId,
};

/// In-memory store implementing every collaborator trait.
///
/// Reads perform linear scans and are intended only for small datasets.
/// [`MemoryStore::with_failure`] makes every read in an area fail, which
/// exercises the degrade paths of the pipeline.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    drinks: Vec<Drink>,
    profiles: BTreeMap<UserId, PreferenceProfile>,
    filters: BTreeMap<UserId, ActiveFilter>,
    interactions: Vec<Interaction>,
    feedback: Vec<Feedback>,
    quiz: BTreeMap<UserId, Vec<QuizAnswer>>,
    failing: BTreeSet<StoreArea>,
}

impl MemoryStore {
    /// Create a store holding the given catalog.
    pub fn with_drinks<I>(drinks: I) -> Self
    where
        I: IntoIterator<Item = Drink>,
    {
        Self {
            drinks: drinks.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add a drink to the catalog.
    #[must_use]
    pub fn with_drink(mut self, drink: Drink) -> Self {
        self.drinks.push(drink);
        self
    }

    /// Set a user's preference profile.
    #[must_use]
    pub fn with_profile(mut self, user: UserId, profile: PreferenceProfile) -> Self {
        self.profiles.insert(user, profile);
        self
    }

    /// Set a user's active filter.
    #[must_use]
    pub fn with_filter(mut self, user: UserId, filter: ActiveFilter) -> Self {
        self.filters.insert(user, filter);
        self
    }

    /// Insert or replace an interaction record.
    #[must_use]
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions
            .retain(|i| !(i.user_id == interaction.user_id && i.drink_id == interaction.drink_id));
        self.interactions.push(interaction);
        self
    }

    /// Add a feedback record.
    #[must_use]
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback.push(feedback);
        self
    }

    /// Add a quiz answer for `user`.
    #[must_use]
    pub fn with_quiz_answer(mut self, user: UserId, answer: QuizAnswer) -> Self {
        self.quiz.entry(user).or_default().push(answer);
        self
    }

    /// Make every read in `area` fail.
    #[must_use]
    pub fn with_failure(mut self, area: StoreArea) -> Self {
        self.failing.insert(area);
        self
    }

    fn check(&self, area: StoreArea) -> Result<(), StoreError> {
        if self.failing.contains(&area) {
            Err(StoreError::new(area, "injected failure"))
        } else {
            Ok(())
        }
    }
}

impl CatalogReader for MemoryStore {
    fn drinks_matching(&self, query: &DrinkQuery) -> Result<Vec<Drink>, StoreError> {
        self.check(StoreArea::Catalog)?;
        Ok(query.select(&self.drinks))
    }

    fn drink(&self, id: DrinkId) -> Result<Option<Drink>, StoreError> {
        self.check(StoreArea::Catalog)?;
        Ok(self.drinks.iter().find(|d| d.id == id).cloned())
    }

    fn categories(&self) -> Result<Vec<String>, StoreError> {
        self.check(StoreArea::Catalog)?;
        let categories: BTreeSet<_> = self.drinks.iter().map(|d| d.category.clone()).collect();
        Ok(categories.into_iter().collect())
    }
}

impl PreferenceStore for MemoryStore {
    fn profile(&self, user: UserId) -> Result<Option<PreferenceProfile>, StoreError> {
        self.check(StoreArea::Preferences)?;
        Ok(self.profiles.get(&user).cloned())
    }

    fn active_filter(&self, user: UserId) -> Result<Option<ActiveFilter>, StoreError> {
        self.check(StoreArea::Preferences)?;
        Ok(self.filters.get(&user).cloned())
    }
}

impl InteractionStore for MemoryStore {
    fn interactions(&self, user: UserId) -> Result<Vec<Interaction>, StoreError> {
        self.check(StoreArea::Interactions)?;
        Ok(self
            .interactions
            .iter()
            .filter(|i| i.user_id == user)
            .cloned()
            .collect())
    }

    fn interaction(
        &self,
        user: UserId,
        drink: DrinkId,
    ) -> Result<Option<Interaction>, StoreError> {
        self.check(StoreArea::Interactions)?;
        Ok(self
            .interactions
            .iter()
            .find(|i| i.user_id == user && i.drink_id == drink)
            .cloned())
    }

    fn favorited_by_others(
        &self,
        drinks: &BTreeSet<DrinkId>,
        excluding: UserId,
        limit: usize,
    ) -> Result<Vec<UserId>, StoreError> {
        self.check(StoreArea::Interactions)?;
        let users: BTreeSet<_> = self
            .interactions
            .iter()
            .filter(|i| i.is_favorite && i.user_id != excluding && drinks.contains(&i.drink_id))
            .map(|i| i.user_id)
            .collect();
        Ok(users.into_iter().take(limit).collect())
    }

    fn favorites_of(&self, users: &[UserId]) -> Result<BTreeSet<DrinkId>, StoreError> {
        self.check(StoreArea::Interactions)?;
        Ok(self
            .interactions
            .iter()
            .filter(|i| i.is_favorite && users.contains(&i.user_id))
            .map(|i| i.drink_id)
            .collect())
    }
}

impl FeedbackStore for MemoryStore {
    fn feedback(&self, user: UserId) -> Result<Vec<Feedback>, StoreError> {
        self.check(StoreArea::Feedback)?;
        Ok(self
            .feedback
            .iter()
            .filter(|f| f.user_id == user)
            .cloned()
            .collect())
    }
}

impl QuizStore for MemoryStore {
    fn quiz_answers(&self, user: UserId) -> Result<Vec<QuizAnswer>, StoreError> {
        self.check(StoreArea::Quiz)?;
        Ok(self.quiz.get(&user).cloned().unwrap_or_default())
    }
}
