//! Historical user activity: interactions, feedback and quiz answers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{DrinkId, UserId};

/// Rating at or above which a drink counts as highly rated.
pub const HIGH_RATING: f32 = 4.0;

/// A user's running record with one drink.
///
/// Created on first interaction and updated in place afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interaction {
    /// Owner of the record.
    pub user_id: UserId,
    /// Drink the record is about.
    pub drink_id: DrinkId,
    /// How many times the user consumed the drink.
    #[cfg_attr(feature = "serde", serde(default))]
    pub times_consumed: u32,
    /// Whether the drink is a favourite.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_favorite: bool,
    /// Rating in `0.0..=5.0`; `0.0` means unrated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: f32,
    /// Whether the user dismissed the drink as "not for me".
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_not_for_me: bool,
    /// Last time the drink page was viewed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub viewed_at: Option<DateTime<Utc>>,
    /// Last time the drink was consumed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_consumed: Option<DateTime<Utc>>,
}

impl Interaction {
    /// Start an empty record for `user_id` and `drink_id`.
    #[must_use]
    pub const fn new(user_id: UserId, drink_id: DrinkId) -> Self {
        Self {
            user_id,
            drink_id,
            times_consumed: 0,
            is_favorite: false,
            rating: 0.0,
            is_not_for_me: false,
            viewed_at: None,
            last_consumed: None,
        }
    }

    /// Mark the drink as a favourite.
    #[must_use]
    pub const fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }

    /// Record a rating. Values are clamped into `0.0..=5.0`.
    #[must_use]
    pub fn rated(mut self, rating: f32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    /// Mark the drink as "not for me".
    #[must_use]
    pub const fn not_for_me(mut self) -> Self {
        self.is_not_for_me = true;
        self
    }

    /// Whether the rating reaches [`HIGH_RATING`].
    #[must_use]
    pub fn is_highly_rated(&self) -> bool {
        self.rating >= HIGH_RATING
    }
}

/// Kind of explicit feedback a user left on a drink.
///
/// # Examples
/// ```
/// use sipwise_core::FeedbackKind;
///
/// assert_eq!("too_sweet".parse::<FeedbackKind>(), Ok(FeedbackKind::TooSweet));
/// assert!(FeedbackKind::TooBitter.is_taste_mismatch());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeedbackKind {
    /// The user does not want to see the drink again.
    NotForMe,
    /// The user loved the drink.
    LoveIt,
    /// The drink was too sweet.
    TooSweet,
    /// The drink was too bitter.
    TooBitter,
    /// The drink was too expensive.
    TooExpensive,
    /// The drink was exactly right.
    Perfect,
}

/// Error returned when parsing a [`FeedbackKind`] fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feedback kind '{0}'")]
pub struct ParseFeedbackKindError(pub String);

impl FeedbackKind {
    /// Return the snake-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotForMe => "not_for_me",
            Self::LoveIt => "love_it",
            Self::TooSweet => "too_sweet",
            Self::TooBitter => "too_bitter",
            Self::TooExpensive => "too_expensive",
            Self::Perfect => "perfect",
        }
    }

    /// Whether the feedback complains about taste balance.
    #[must_use]
    pub const fn is_taste_mismatch(self) -> bool {
        matches!(self, Self::TooSweet | Self::TooBitter)
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = ParseFeedbackKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_for_me" => Ok(Self::NotForMe),
            "love_it" => Ok(Self::LoveIt),
            "too_sweet" => Ok(Self::TooSweet),
            "too_bitter" => Ok(Self::TooBitter),
            "too_expensive" => Ok(Self::TooExpensive),
            "perfect" => Ok(Self::Perfect),
            other => Err(ParseFeedbackKindError(other.to_owned())),
        }
    }
}

/// Explicit feedback on a drink. Several kinds may coexist per drink.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feedback {
    /// Author of the feedback.
    pub user_id: UserId,
    /// Drink the feedback is about.
    pub drink_id: DrinkId,
    /// Feedback kind.
    pub kind: FeedbackKind,
    /// Optional free-text note.
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: Option<String>,
    /// When the feedback was left.
    #[cfg_attr(feature = "serde", serde(default = "Utc::now"))]
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Record feedback of `kind` created now.
    #[must_use]
    pub fn new(user_id: UserId, drink_id: DrinkId, kind: FeedbackKind) -> Self {
        Self {
            user_id,
            drink_id,
            kind,
            note: None,
            created_at: Utc::now(),
        }
    }
}

/// A historical answer to a taste-quiz question.
///
/// The topic is the question's category (`budget`, `sweetness`,
/// `caffeine`, `adventure`, ...). Unknown topics are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuizAnswer {
    /// Category of the question that was answered.
    pub topic: String,
    /// Free-text answer as submitted.
    pub answer: String,
}

impl QuizAnswer {
    /// Construct an answer.
    #[must_use]
    pub fn new(topic: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            answer: answer.into(),
        }
    }
}
