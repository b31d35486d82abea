//! Request, response and explanation types exposed by a recommender.

use thiserror::Error;

use crate::{Drink, StrategyLabel, UserId};

/// Smallest accepted result limit.
pub const MIN_LIMIT: usize = 1;
/// Largest accepted result limit.
pub const MAX_LIMIT: usize = 50;
/// Result limit used when the caller does not supply one.
pub const DEFAULT_LIMIT: usize = 10;
/// Maximum number of reasons in an explanation.
pub const MAX_REASONS: usize = 3;
/// Reason used when no explanation could be generated.
pub const FALLBACK_REASON: &str = "Recommended based on your preferences";

/// Errors returned when building a [`RecommendationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The limit fell outside `1..=50`.
    #[error("limit {0} is outside the accepted range 1..=50")]
    LimitOutOfRange(usize),
}

/// Parameters of a recommendation request.
///
/// # Examples
/// ```
/// use sipwise_core::{RecommendationRequest, StrategyLabel};
///
/// let request = RecommendationRequest::new(5)
///     .expect("valid limit")
///     .with_strategy(StrategyLabel::Content);
/// assert_eq!(request.limit(), 5);
/// assert!(RecommendationRequest::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationRequest {
    limit: usize,
    strategy: Option<StrategyLabel>,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            strategy: None,
        }
    }
}

impl RecommendationRequest {
    /// Validate `limit` and build a request with no strategy override.
    ///
    /// # Errors
    /// Returns [`RequestError::LimitOutOfRange`] when `limit` is not in
    /// `1..=50`.
    pub const fn new(limit: usize) -> Result<Self, RequestError> {
        if limit < MIN_LIMIT || limit > MAX_LIMIT {
            return Err(RequestError::LimitOutOfRange(limit));
        }
        Ok(Self {
            limit,
            strategy: None,
        })
    }

    /// Request a specific strategy label.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: StrategyLabel) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Maximum number of results.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Strategy override, if any.
    #[must_use]
    pub const fn strategy(&self) -> Option<StrategyLabel> {
        self.strategy
    }

    /// Label the response reports: the override or `hybrid`.
    #[must_use]
    pub fn label(&self) -> StrategyLabel {
        self.strategy.unwrap_or_default()
    }
}

/// One to three human-readable reasons for a recommendation.
///
/// # Examples
/// ```
/// use sipwise_core::Explanation;
///
/// let explanation = Explanation::from_reasons(["a", "b", "a", "c", "d"]);
/// assert_eq!(explanation.reasons(), ["a", "b", "c"]);
/// assert_eq!(Explanation::from_reasons(Vec::<String>::new()).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Explanation(Vec<String>);

impl Explanation {
    /// Deduplicate `reasons` keeping first occurrences, then keep at most
    /// three. An empty input yields the fallback explanation.
    pub fn from_reasons<I, S>(reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::with_capacity(MAX_REASONS);
        for reason in reasons {
            if kept.len() == MAX_REASONS {
                break;
            }
            let reason = reason.into();
            if !kept.contains(&reason) {
                kept.push(reason);
            }
        }
        if kept.is_empty() {
            return Self::fallback();
        }
        Self(kept)
    }

    /// The single-reason fallback explanation.
    #[must_use]
    pub fn fallback() -> Self {
        Self(vec![FALLBACK_REASON.to_owned()])
    }

    /// Reasons in display order.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.0
    }

    /// Number of reasons; always in `1..=3`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the explanation.
    #[must_use]
    pub fn into_reasons(self) -> Vec<String> {
        self.0
    }
}

/// A ranked, explained result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    /// Recommended drink.
    pub drink: Drink,
    /// Final score after adjustment.
    pub score: f32,
    /// Reasons shown to the user.
    pub explanation: Explanation,
    /// Strategy that surfaced the drink.
    pub strategy: StrategyLabel,
}

/// Result of [`Recommender::recommend`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecommendationResponse {
    /// Results in rank order.
    pub recommendations: Vec<Recommendation>,
    /// Unique candidates before truncation.
    pub total_count: usize,
    /// Label resolved from the request.
    pub strategy: StrategyLabel,
}

impl RecommendationResponse {
    /// A response with no results.
    #[must_use]
    pub const fn empty(strategy: StrategyLabel) -> Self {
        Self {
            recommendations: Vec::new(),
            total_count: 0,
            strategy,
        }
    }
}

/// Produce ranked, explained drink recommendations.
///
/// Both operations are infallible: collaborator and compute failures are
/// contained and degrade to empty results or the fallback explanation.
/// Recommenders must be `Send + Sync` to serve concurrent requests.
pub trait Recommender: Send + Sync {
    /// Recommend drinks for `user`. `age_verified` gates alcoholic drinks.
    fn recommend(
        &self,
        user: UserId,
        request: &RecommendationRequest,
        age_verified: bool,
    ) -> RecommendationResponse;

    /// Explain why `drink` suits `user` at `score` under `label`.
    fn explain(
        &self,
        user: UserId,
        drink: &Drink,
        score: f32,
        label: StrategyLabel,
    ) -> Explanation;
}
