//! Bounded taste levels and price tiers.
//!
//! Sweetness and bitterness share the inclusive `1..=10` scale used by the
//! catalog and the preference profile. Price tiers are ordered from the
//! cheapest (`$`) to the most expensive (`$$$`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A taste intensity on the inclusive `1..=10` scale.
///
/// # Examples
/// ```
/// use sipwise_core::TasteLevel;
///
/// let level = TasteLevel::new(7).expect("in range");
/// assert_eq!(level.get(), 7);
/// assert!(TasteLevel::new(11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct TasteLevel(u8);

/// Errors returned by [`TasteLevel::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TasteLevelError {
    /// The value fell outside `1..=10`.
    #[error("taste level {0} is outside the 1..=10 scale")]
    OutOfRange(u8),
}

impl TasteLevel {
    /// Lowest level on the scale.
    pub const MIN: Self = Self(1);
    /// Highest level on the scale.
    pub const MAX: Self = Self(10);
    /// Midpoint used when nothing else is known.
    pub const NEUTRAL: Self = Self(5);

    /// Validate and construct a level.
    ///
    /// # Errors
    /// Returns [`TasteLevelError::OutOfRange`] when `value` is not in
    /// `1..=10`.
    pub const fn new(value: u8) -> Result<Self, TasteLevelError> {
        if value >= 1 && value <= 10 {
            Ok(Self(value))
        } else {
            Err(TasteLevelError::OutOfRange(value))
        }
    }

    /// Return the raw level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Absolute distance between two levels.
    #[must_use]
    pub const fn distance(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// Move `steps` down the scale, stopping at [`Self::MIN`].
    #[must_use]
    pub const fn saturating_sub(self, steps: u8) -> Self {
        let value = self.0.saturating_sub(steps);
        if value < Self::MIN.0 {
            Self::MIN
        } else {
            Self(value)
        }
    }

    /// Move `steps` up the scale, stopping at [`Self::MAX`].
    #[must_use]
    pub const fn saturating_add(self, steps: u8) -> Self {
        let value = self.0.saturating_add(steps);
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }
}

impl Default for TasteLevel {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u8> for TasteLevel {
    type Error = TasteLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TasteLevel> for u8 {
    fn from(level: TasteLevel) -> Self {
        level.0
    }
}

impl fmt::Display for TasteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Price band of a drink.
///
/// # Examples
/// ```
/// use sipwise_core::PriceTier;
///
/// assert_eq!("$$".parse::<PriceTier>(), Ok(PriceTier::Standard));
/// assert!(PriceTier::Budget < PriceTier::Premium);
/// assert_eq!(PriceTier::Premium.to_string(), "$$$");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceTier {
    /// Under five dollars.
    #[cfg_attr(feature = "serde", serde(rename = "$"))]
    Budget,
    /// Between five and ten dollars.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "$$"))]
    Standard,
    /// Over ten dollars.
    #[cfg_attr(feature = "serde", serde(rename = "$$$"))]
    Premium,
}

/// Error returned when parsing a [`PriceTier`] fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown price tier '{0}'")]
pub struct ParsePriceTierError(pub String);

impl PriceTier {
    /// Return the dollar-sign notation used by the catalog.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Standard => "$$",
            Self::Premium => "$$$",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceTier {
    type Err = ParsePriceTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(Self::Budget),
            "$$" => Ok(Self::Standard),
            "$$$" => Ok(Self::Premium),
            other => Err(ParsePriceTierError(other.to_owned())),
        }
    }
}
