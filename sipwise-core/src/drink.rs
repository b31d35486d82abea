//! Catalog drinks and their ingredients.

use thiserror::Error;

use crate::{DrinkId, PriceTier, TasteLevel};

/// One ingredient of a drink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ingredient {
    /// Ingredient name as listed by the catalog.
    pub name: String,
    /// Whether the ingredient is a common allergen.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_allergen: bool,
}

impl Ingredient {
    /// Construct a non-allergenic ingredient.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_allergen: false,
        }
    }

    /// Construct an ingredient flagged as a common allergen.
    #[must_use]
    pub fn allergen(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_allergen: true,
        }
    }
}

/// A drink offered by the catalog.
///
/// Drinks are immutable for the duration of a recommendation request. The
/// nutritional fields are validated by [`Drink::validate`], which the
/// builder-style setters do not call; construct through [`Drink::new`] and
/// finish with [`Drink::validate`] when the values come from outside.
///
/// # Examples
/// ```
/// use sipwise_core::{Drink, DrinkId, PriceTier, TasteLevel};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let drink = Drink::new(DrinkId(1), "Flat White", "coffee", PriceTier::Standard)
///     .with_sweetness(TasteLevel::new(3)?)
///     .with_caffeine_mg(130)
///     .with_sugar_g(9.0)
///     .validate()?;
/// assert_eq!(drink.caffeine_mg, 130);
/// assert!(!drink.is_alcoholic());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drink {
    /// Catalog identifier.
    pub id: DrinkId,
    /// Display name.
    pub name: String,
    /// Catalog category, e.g. `coffee` or `tea`.
    pub category: String,
    /// Price band.
    pub price_tier: PriceTier,
    /// Sweetness on the `1..=10` scale.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sweetness: TasteLevel,
    /// Caffeine per serving in milligrams.
    #[cfg_attr(feature = "serde", serde(default))]
    pub caffeine_mg: u32,
    /// Sugar per serving in grams.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sugar_g: f32,
    /// Calories per serving.
    #[cfg_attr(feature = "serde", serde(default))]
    pub calories: u32,
    /// Alcohol by volume as a percentage; `None` for non-alcoholic drinks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub alcohol_percent: Option<f32>,
    /// Ingredients in catalog order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ingredients: Vec<Ingredient>,
}

/// Errors returned by [`Drink::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrinkError {
    /// The drink name was blank.
    #[error("drink {id} must have a name")]
    MissingName {
        /// Offending drink.
        id: DrinkId,
    },
    /// The category was blank.
    #[error("drink {id} must have a category")]
    MissingCategory {
        /// Offending drink.
        id: DrinkId,
    },
    /// Sugar content was negative or not finite.
    #[error("drink {id} has invalid sugar content {value}")]
    InvalidSugar {
        /// Offending drink.
        id: DrinkId,
        /// Rejected value.
        value: f32,
    },
    /// Alcohol strength fell outside `0..=100`.
    #[error("drink {id} has invalid alcohol strength {value}")]
    InvalidAlcohol {
        /// Offending drink.
        id: DrinkId,
        /// Rejected value.
        value: f32,
    },
}

impl Drink {
    /// Start a drink with neutral sweetness, no caffeine, sugar, calories or
    /// alcohol, and no ingredients.
    #[must_use]
    pub fn new(
        id: DrinkId,
        name: impl Into<String>,
        category: impl Into<String>,
        price_tier: PriceTier,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price_tier,
            sweetness: TasteLevel::NEUTRAL,
            caffeine_mg: 0,
            sugar_g: 0.0,
            calories: 0,
            alcohol_percent: None,
            ingredients: Vec::new(),
        }
    }

    /// Set the sweetness level.
    #[must_use]
    pub const fn with_sweetness(mut self, sweetness: TasteLevel) -> Self {
        self.sweetness = sweetness;
        self
    }

    /// Set the caffeine content.
    #[must_use]
    pub const fn with_caffeine_mg(mut self, caffeine_mg: u32) -> Self {
        self.caffeine_mg = caffeine_mg;
        self
    }

    /// Set the sugar content.
    #[must_use]
    pub const fn with_sugar_g(mut self, sugar_g: f32) -> Self {
        self.sugar_g = sugar_g;
        self
    }

    /// Set the calorie content.
    #[must_use]
    pub const fn with_calories(mut self, calories: u32) -> Self {
        self.calories = calories;
        self
    }

    /// Mark the drink as alcoholic with the given strength.
    #[must_use]
    pub const fn with_alcohol_percent(mut self, percent: f32) -> Self {
        self.alcohol_percent = Some(percent);
        self
    }

    /// Append an ingredient.
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Check the nutritional invariants and return the drink unchanged.
    ///
    /// # Errors
    /// Returns [`DrinkError`] when the name or category is blank, sugar is
    /// negative or not finite, or the alcohol strength is outside
    /// `0..=100`.
    pub fn validate(self) -> Result<Self, DrinkError> {
        if self.name.trim().is_empty() {
            return Err(DrinkError::MissingName { id: self.id });
        }
        if self.category.trim().is_empty() {
            return Err(DrinkError::MissingCategory { id: self.id });
        }
        if !self.sugar_g.is_finite() || self.sugar_g < 0.0 {
            return Err(DrinkError::InvalidSugar {
                id: self.id,
                value: self.sugar_g,
            });
        }
        if let Some(percent) = self.alcohol_percent
            && !(0.0..=100.0).contains(&percent)
        {
            return Err(DrinkError::InvalidAlcohol {
                id: self.id,
                value: percent,
            });
        }
        Ok(self)
    }

    /// Whether the drink contains alcohol.
    #[must_use]
    pub const fn is_alcoholic(&self) -> bool {
        self.alcohol_percent.is_some()
    }

    /// Whether the drink lists ingredients and none of them is an allergen.
    #[must_use]
    pub fn is_allergen_free(&self) -> bool {
        !self.ingredients.is_empty() && self.ingredients.iter().all(|i| !i.is_allergen)
    }
}
