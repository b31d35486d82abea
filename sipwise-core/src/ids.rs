//! Strongly typed identifiers for users and drinks.
//!
//! Both identifiers wrap a `u64` but are distinct types so a user id can
//! never be passed where a drink id is expected.

use std::fmt;

/// Identifier of a registered user.
///
/// # Examples
/// ```
/// use sipwise_core::UserId;
///
/// let user = UserId(7);
/// assert_eq!(user.to_string(), "user#7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(pub u64);

/// Identifier of a catalog drink.
///
/// # Examples
/// ```
/// use sipwise_core::DrinkId;
///
/// assert_eq!(DrinkId(3).get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DrinkId(pub u64);

impl UserId {
    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl DrinkId {
    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

impl fmt::Display for DrinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drink#{}", self.0)
    }
}
