//! Collaborator traits through which the engine reads persisted state.
//!
//! The engine never writes through these traits. Each read is fallible
//! with [`StoreError`]; callers decide whether a failure degrades to an
//! empty result or propagates.

use std::{collections::BTreeSet, error::Error as StdError, fmt};

use thiserror::Error;

use crate::{
    ActiveFilter, Drink, DrinkId, DrinkQuery, Feedback, Interaction, PreferenceProfile, QuizAnswer,
    UserId,
};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteStore, SqliteStoreError};

/// Collaborator area a read belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreArea {
    /// Drink catalog.
    Catalog,
    /// Preference profiles and active filters.
    Preferences,
    /// Interaction records.
    Interactions,
    /// Feedback records.
    Feedback,
    /// Taste-quiz answers.
    Quiz,
}

impl StoreArea {
    /// Return the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Preferences => "preferences",
            Self::Interactions => "interactions",
            Self::Feedback => "feedback",
            Self::Quiz => "quiz",
        }
    }
}

impl fmt::Display for StoreArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collaborator read failed.
#[derive(Debug, Error)]
#[error("{area} read failed: {message}")]
pub struct StoreError {
    area: StoreArea,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl StoreError {
    /// Failure described only by a message.
    pub fn new(area: StoreArea, message: impl Into<String>) -> Self {
        Self {
            area,
            message: message.into(),
            source: None,
        }
    }

    /// Failure caused by an underlying error.
    pub fn with_source<E>(area: StoreArea, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            area,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Area that failed.
    #[must_use]
    pub const fn area(&self) -> StoreArea {
        self.area
    }
}

/// Read access to the drink catalog.
pub trait CatalogReader: Send + Sync {
    /// Drinks satisfying `query`, in catalog order, at most `query.limit`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the catalog cannot be read.
    fn drinks_matching(&self, query: &DrinkQuery) -> Result<Vec<Drink>, StoreError>;

    /// A single drink.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the catalog cannot be read.
    fn drink(&self, id: DrinkId) -> Result<Option<Drink>, StoreError>;

    /// Distinct categories present in the catalog, sorted.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the catalog cannot be read.
    fn categories(&self) -> Result<Vec<String>, StoreError>;
}

/// Read access to preference profiles and filters.
pub trait PreferenceStore: Send + Sync {
    /// The user's preference profile, if one was created.
    ///
    /// # Errors
    /// Returns [`StoreError`] when preferences cannot be read.
    fn profile(&self, user: UserId) -> Result<Option<PreferenceProfile>, StoreError>;

    /// The user's active filter, if one is switched on.
    ///
    /// # Errors
    /// Returns [`StoreError`] when filters cannot be read.
    fn active_filter(&self, user: UserId) -> Result<Option<ActiveFilter>, StoreError>;
}

/// Read access to interaction records.
pub trait InteractionStore: Send + Sync {
    /// Every interaction record of `user`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when interactions cannot be read.
    fn interactions(&self, user: UserId) -> Result<Vec<Interaction>, StoreError>;

    /// The record of `user` with `drink`, if any.
    ///
    /// # Errors
    /// Returns [`StoreError`] when interactions cannot be read.
    fn interaction(&self, user: UserId, drink: DrinkId)
    -> Result<Option<Interaction>, StoreError>;

    /// Up to `limit` distinct users other than `excluding` who favourited
    /// at least one of `drinks`, ordered by user id.
    ///
    /// # Errors
    /// Returns [`StoreError`] when interactions cannot be read.
    fn favorited_by_others(
        &self,
        drinks: &BTreeSet<DrinkId>,
        excluding: UserId,
        limit: usize,
    ) -> Result<Vec<UserId>, StoreError>;

    /// Union of the drinks favourited by `users`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when interactions cannot be read.
    fn favorites_of(&self, users: &[UserId]) -> Result<BTreeSet<DrinkId>, StoreError>;
}

/// Read access to explicit feedback.
pub trait FeedbackStore: Send + Sync {
    /// Every feedback record of `user`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when feedback cannot be read.
    fn feedback(&self, user: UserId) -> Result<Vec<Feedback>, StoreError>;
}

/// Read access to historical taste-quiz answers.
pub trait QuizStore: Send + Sync {
    /// Every quiz answer `user` submitted.
    ///
    /// # Errors
    /// Returns [`StoreError`] when quiz results cannot be read.
    fn quiz_answers(&self, user: UserId) -> Result<Vec<QuizAnswer>, StoreError>;
}

/// Every collaborator the recommendation pipeline reads from.
///
/// Implemented automatically for any type implementing all five traits.
pub trait RecommendationStore:
    CatalogReader + PreferenceStore + InteractionStore + FeedbackStore + QuizStore
{
}

impl<T> RecommendationStore for T where
    T: CatalogReader + PreferenceStore + InteractionStore + FeedbackStore + QuizStore
{
}
