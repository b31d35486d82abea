//! Versioned scoring constants shared by every strategy.
//!
//! All weights are fixed; nothing is learned. Grouping them in one value
//! lets a caller load an alternative profile from JSON and have it
//! validated before any scoring happens.

use thiserror::Error;

/// Only supported weight profile version.
pub const WEIGHTS_VERSION: u32 = 1;

/// Largest multiplier an adjustment may apply.
pub const MAX_MULTIPLIER: f32 = 1.2;

/// Weights of the content-based strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentWeights {
    /// Maximum contribution of the sweetness similarity term.
    pub sweetness: f32,
    /// Bonus for an exact price-tier match.
    pub price_tier: f32,
    /// Bonus for staying within the caffeine limit.
    pub caffeine: f32,
    /// Bonus for staying within the sugar limit.
    pub sugar: f32,
    /// Constant popularity bonus.
    pub popularity: f32,
    /// Multiplier applied to drinks the user already favourited.
    pub favorite_dampening: f32,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            sweetness: 0.3,
            price_tier: 0.2,
            caffeine: 0.15,
            sugar: 0.15,
            popularity: 0.1,
            favorite_dampening: 0.8,
        }
    }
}

/// Weights of the collaborative strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollaborativeWeights {
    /// Score given to every collaborative candidate.
    pub base_score: f32,
    /// Maximum number of similar users consulted.
    pub similar_user_limit: usize,
}

impl Default for CollaborativeWeights {
    fn default() -> Self {
        Self {
            base_score: 0.7,
            similar_user_limit: 10,
        }
    }
}

/// Weights of the taste-preference strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TasteWeights {
    /// Maximum contribution of the bitterness term.
    pub bitterness: f32,
    /// Drink-independent bitterness reference the preference is compared to.
    pub bitterness_midpoint: u8,
    /// Bonus for a preferred category.
    pub category: f32,
    /// Bonus when any time-sensitivity rule is configured.
    pub time_sensitivity: f32,
    /// Bonus when any mode preference is configured.
    pub mode: f32,
}

impl Default for TasteWeights {
    fn default() -> Self {
        Self {
            bitterness: 0.2,
            bitterness_midpoint: 5,
            category: 0.3,
            time_sensitivity: 0.1,
            mode: 0.1,
        }
    }
}

/// Multipliers of the feedback adjuster.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedbackWeights {
    /// Multiplier for drinks marked "not for me".
    pub not_for_me: f32,
    /// Multiplier for drinks reported too sweet or too bitter.
    pub taste_mismatch: f32,
    /// Multiplier for highly rated drinks.
    pub high_rating_boost: f32,
    /// Rating at which the boost applies.
    pub high_rating_threshold: f32,
}

impl Default for FeedbackWeights {
    fn default() -> Self {
        Self {
            not_for_me: 0.3,
            taste_mismatch: 0.6,
            high_rating_boost: 1.2,
            high_rating_threshold: 4.0,
        }
    }
}

/// Complete, versioned weight profile.
///
/// # Examples
/// ```
/// use sipwise_core::ScoringWeights;
///
/// let weights = ScoringWeights::default().validate().expect("defaults are valid");
/// assert_eq!(weights.version, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringWeights {
    /// Profile version; must equal [`WEIGHTS_VERSION`].
    pub version: u32,
    /// Content-based weights.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: ContentWeights,
    /// Collaborative weights.
    #[cfg_attr(feature = "serde", serde(default))]
    pub collaborative: CollaborativeWeights,
    /// Taste-preference weights.
    #[cfg_attr(feature = "serde", serde(default))]
    pub taste: TasteWeights,
    /// Feedback multipliers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub feedback: FeedbackWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            version: WEIGHTS_VERSION,
            content: ContentWeights::default(),
            collaborative: CollaborativeWeights::default(),
            taste: TasteWeights::default(),
            feedback: FeedbackWeights::default(),
        }
    }
}

/// Errors returned by [`ScoringWeights::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    /// The profile version is not supported.
    #[error("unsupported weights version {found}; expected 1")]
    UnsupportedVersion {
        /// Version found in the profile.
        found: u32,
    },
    /// An additive weight was negative or not finite.
    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Dotted name of the weight.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A multiplier fell outside `(0, 1.2]`.
    #[error("multiplier `{name}` must be in (0, 1.2], got {value}")]
    InvalidMultiplier {
        /// Dotted name of the multiplier.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The similar-user limit was zero.
    #[error("collaborative.similar_user_limit must be at least 1")]
    ZeroSimilarUsers,
    /// The bitterness midpoint fell outside the taste scale.
    #[error("taste.bitterness_midpoint must be in 1..=10, got {0}")]
    InvalidMidpoint(u8),
}

impl ScoringWeights {
    /// Validate the profile and return it unchanged.
    ///
    /// # Errors
    /// Returns [`WeightsError`] for an unsupported version, a negative or
    /// non-finite additive weight, a multiplier outside `(0, 1.2]`, a zero
    /// similar-user limit, or a bitterness midpoint off the scale.
    pub fn validate(self) -> Result<Self, WeightsError> {
        if self.version != WEIGHTS_VERSION {
            return Err(WeightsError::UnsupportedVersion {
                found: self.version,
            });
        }
        let additive = [
            ("content.sweetness", self.content.sweetness),
            ("content.price_tier", self.content.price_tier),
            ("content.caffeine", self.content.caffeine),
            ("content.sugar", self.content.sugar),
            ("content.popularity", self.content.popularity),
            ("collaborative.base_score", self.collaborative.base_score),
            ("taste.bitterness", self.taste.bitterness),
            ("taste.category", self.taste.category),
            ("taste.time_sensitivity", self.taste.time_sensitivity),
            ("taste.mode", self.taste.mode),
            (
                "feedback.high_rating_threshold",
                self.feedback.high_rating_threshold,
            ),
        ];
        if let Some((name, value)) = additive
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(WeightsError::InvalidWeight { name, value });
        }
        let multipliers = [
            (
                "content.favorite_dampening",
                self.content.favorite_dampening,
            ),
            ("feedback.not_for_me", self.feedback.not_for_me),
            ("feedback.taste_mismatch", self.feedback.taste_mismatch),
            (
                "feedback.high_rating_boost",
                self.feedback.high_rating_boost,
            ),
        ];
        if let Some((name, value)) = multipliers
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0 && *value <= MAX_MULTIPLIER))
        {
            return Err(WeightsError::InvalidMultiplier { name, value });
        }
        if self.collaborative.similar_user_limit == 0 {
            return Err(WeightsError::ZeroSimilarUsers);
        }
        if !(1..=10).contains(&self.taste.bitterness_midpoint) {
            return Err(WeightsError::InvalidMidpoint(self.taste.bitterness_midpoint));
        }
        Ok(self)
    }
}
