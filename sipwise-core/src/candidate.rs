//! Scored candidates and the trait implemented by scoring strategies.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Drink, UserSignals};

/// Strategy that produced a scored candidate.
///
/// The declaration order is the deduplication priority: when several
/// strategies surface the same drink, the earliest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyTag {
    /// Content-based scoring against the preference profile.
    Content,
    /// Collaborative scoring from similar users' favourites.
    Collaborative,
    /// Secondary taste-preference scoring.
    Taste,
}

impl StrategyTag {
    /// Every tag in priority order.
    pub const ALL: [Self; 3] = [Self::Content, Self::Collaborative, Self::Taste];

    /// Deduplication priority; lower wins.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Content => 0,
            Self::Collaborative => 1,
            Self::Taste => 2,
        }
    }

    /// Return the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        StrategyLabel::from_tag(self).as_str()
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy label reported on a response and used to pick explanation
/// sub-generators.
///
/// # Examples
/// ```
/// use sipwise_core::StrategyLabel;
///
/// assert_eq!(StrategyLabel::default(), StrategyLabel::Hybrid);
/// assert_eq!("taste".parse::<StrategyLabel>(), Ok(StrategyLabel::Taste));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyLabel {
    /// Content-based.
    Content,
    /// Collaborative.
    Collaborative,
    /// Taste-preference.
    Taste,
    /// All strategies combined.
    #[default]
    Hybrid,
}

/// Error returned when parsing a [`StrategyLabel`] fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}'; expected content, collaborative, taste or hybrid")]
pub struct ParseStrategyLabelError(pub String);

impl StrategyLabel {
    /// Label matching a strategy tag.
    #[must_use]
    pub const fn from_tag(tag: StrategyTag) -> Self {
        match tag {
            StrategyTag::Content => Self::Content,
            StrategyTag::Collaborative => Self::Collaborative,
            StrategyTag::Taste => Self::Taste,
        }
    }

    /// Return the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Collaborative => "collaborative",
            Self::Taste => "taste",
            Self::Hybrid => "hybrid",
        }
    }

    /// Whether preference-match reasons apply to this label.
    #[must_use]
    pub const fn includes_content(self) -> bool {
        matches!(self, Self::Content | Self::Hybrid)
    }

    /// Whether collaborative reasons apply to this label.
    #[must_use]
    pub const fn includes_collaborative(self) -> bool {
        matches!(self, Self::Collaborative | Self::Hybrid)
    }
}

impl From<StrategyTag> for StrategyLabel {
    fn from(tag: StrategyTag) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Display for StrategyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyLabel {
    type Err = ParseStrategyLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "collaborative" => Ok(Self::Collaborative),
            "taste" => Ok(Self::Taste),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(ParseStrategyLabelError(s.to_owned())),
        }
    }
}

/// A drink with a score and the reasons that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Candidate drink.
    pub drink: Drink,
    /// Unnormalised score; only meaningful relative to other candidates.
    pub score: f32,
    /// Reasons in the order they were added.
    pub reasons: Vec<String>,
    /// Strategy that produced the candidate.
    pub strategy: StrategyTag,
}

impl ScoredCandidate {
    /// Construct a candidate without reasons.
    #[must_use]
    pub const fn new(drink: Drink, score: f32, strategy: StrategyTag) -> Self {
        Self {
            drink,
            score,
            reasons: Vec::new(),
            strategy,
        }
    }

    /// Append a reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }
}

/// A scoring strategy evaluated over a shared candidate pool.
///
/// Implementations must be pure with respect to their inputs: they read
/// the pool and the requester's signals and return candidates in pool
/// order. A strategy that has nothing to say returns an empty vector.
///
/// # Examples
/// ```
/// use sipwise_core::{CandidateScorer, Drink, ScoredCandidate, StrategyTag, UserSignals};
///
/// struct Flat;
///
/// impl CandidateScorer for Flat {
///     fn tag(&self) -> StrategyTag {
///         StrategyTag::Taste
///     }
///
///     fn score(&self, pool: &[Drink], _signals: &UserSignals) -> Vec<ScoredCandidate> {
///         pool.iter()
///             .map(|drink| ScoredCandidate::new(drink.clone(), 0.5, self.tag()))
///             .collect()
///     }
/// }
/// ```
pub trait CandidateScorer: Send + Sync {
    /// Tag stamped on every candidate this strategy produces.
    fn tag(&self) -> StrategyTag;

    /// Score the pool for the requester described by `signals`.
    fn score(&self, pool: &[Drink], signals: &UserSignals) -> Vec<ScoredCandidate>;
}
