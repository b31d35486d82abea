//! Reason sub-generators.
//!
//! Each function appends the phrases one signal family contributes, in a
//! fixed order. Deduplication and truncation happen afterwards.

use sipwise_core::{
    ActiveFilter, Drink, FeedbackKind, PreferenceProfile, PriceTier, QuizAnswer, UserSignals,
};

/// Sweetness distance that still counts as a match.
const SWEETNESS_MATCH: u8 = 2;
/// Sweetness distance that still counts as close.
const SWEETNESS_CLOSE: u8 = 4;
const LOW_CALORIES: u32 = 200;
const LOW_CAFFEINE_MG: u32 = 50;
const POSITIVE_RATING: f32 = 3.0;
const ADVENTUROUS_SCORE: i64 = 7;
const ADVENTUROUS_CATEGORIES: [&str; 2] = ["experimental", "innovative"];

pub(crate) fn preference_match(
    drink: &Drink,
    profile: Option<&PreferenceProfile>,
    signals: &UserSignals,
    out: &mut Vec<String>,
) {
    if let Some(prefs) = profile {
        let distance = drink.sweetness.distance(prefs.sweetness);
        if distance <= SWEETNESS_MATCH {
            out.push(format!(
                "Matches your preferred sweetness level ({}/10)",
                drink.sweetness
            ));
        } else if distance <= SWEETNESS_CLOSE {
            out.push("Close to your preferred sweetness level".to_owned());
        }
        out.push("Bitterness level suits your taste".to_owned());
        if drink.sugar_g <= prefs.sugar_limit_g {
            out.push(format!("Within your sugar limit ({:?}g)", drink.sugar_g));
        }
        if drink.caffeine_mg <= prefs.caffeine_limit_mg {
            out.push(format!(
                "Fits your caffeine preferences ({}mg)",
                drink.caffeine_mg
            ));
        }
        if drink.price_tier == prefs.preferred_price_tier {
            out.push(format!(
                "Within your preferred price range ({})",
                drink.price_tier
            ));
        }
        if prefs.prefers_category(&drink.category) {
            out.push(format!(
                "From your preferred category: {}",
                drink.category
            ));
        }
    }
    if signals.is_favorite(drink.id) {
        out.push("Similar to your favorite drinks".to_owned());
    }
}

pub(crate) fn collaborative_signal(favourited_elsewhere: bool, out: &mut Vec<String>) {
    if favourited_elsewhere {
        out.push("Users with similar taste also enjoyed this drink".to_owned());
        out.push("Popular among users who like similar drinks".to_owned());
    }
}

pub(crate) fn general_compatibility(
    drink: &Drink,
    filter: Option<&ActiveFilter>,
    out: &mut Vec<String>,
) {
    if drink.calories < LOW_CALORIES {
        out.push("Low-calorie option".to_owned());
    }
    if drink.caffeine_mg == 0 {
        out.push("Caffeine-free choice".to_owned());
    } else if drink.caffeine_mg < LOW_CAFFEINE_MG {
        out.push("Low caffeine content".to_owned());
    }
    if !drink.is_alcoholic() {
        out.push("Non-alcoholic and safe for all ages".to_owned());
    }
    if !drink.ingredients.is_empty() && drink.is_allergen_free() {
        out.push("Free from common allergens".to_owned());
    }
    if filter.is_some() {
        out.push("Suitable for current time of day".to_owned());
    }
    let commentary = match drink.category.as_str() {
        "coffee" => Some("Perfect coffee choice"),
        "tea" => Some("Healthy tea selection"),
        "smoothie" => Some("Nutritious smoothie option"),
        "water" => Some("Refreshing hydration choice"),
        _ => None,
    };
    out.extend(commentary.map(str::to_owned));
}

pub(crate) fn feedback_history(drink: &Drink, signals: &UserSignals, out: &mut Vec<String>) {
    if let Some(interaction) = signals.interaction(drink.id) {
        if interaction.is_highly_rated() {
            out.push("Based on your high ratings for similar drinks".to_owned());
        } else if interaction.rating >= POSITIVE_RATING {
            out.push("Similar to drinks you've rated positively".to_owned());
        }
    }
    if signals.has_feedback(drink.id, FeedbackKind::LoveIt) {
        out.push("You loved a similar drink".to_owned());
    } else if signals.has_feedback(drink.id, FeedbackKind::Perfect) {
        out.push("Matches drinks you've called 'perfect'".to_owned());
    }
    if signals.has_feedback(drink.id, FeedbackKind::NotForMe) {
        out.push("Similar to a drink you didn't enjoy".to_owned());
    }
}

pub(crate) fn quiz_alignment(drink: &Drink, answers: &[QuizAnswer], out: &mut Vec<String>) {
    for answer in answers {
        let reason = match answer.topic.as_str() {
            "budget" => budget_reason(drink, &answer.answer),
            "sweetness" => sweetness_reason(drink, &answer.answer),
            "caffeine" => caffeine_reason(drink, &answer.answer),
            "adventure" => adventure_reason(drink, &answer.answer),
            _ => None,
        };
        out.extend(reason.map(str::to_owned));
    }
}

fn budget_reason(drink: &Drink, answer: &str) -> Option<&'static str> {
    match (answer, drink.price_tier) {
        ("$ (Under $5)", PriceTier::Budget) => Some("Fits your budget preference"),
        ("$$ ($5-$10)", PriceTier::Standard) => Some("Within your budget range"),
        ("$$$ (Over $10)", PriceTier::Premium) => Some("Matches your willingness to spend more"),
        _ => None,
    }
}

fn sweetness_reason(drink: &Drink, answer: &str) -> Option<&'static str> {
    let sweetness = drink.sweetness.get();
    match answer {
        "Very sweet" | "Slightly sweet" if sweetness >= 6 => {
            Some("Matches your sweetness preference from quiz")
        }
        "Black" if sweetness <= 3 => Some("Aligns with your preference for less sweet drinks"),
        _ => None,
    }
}

fn caffeine_reason(drink: &Drink, answer: &str) -> Option<&'static str> {
    match answer {
        "Decaffeinated" if drink.caffeine_mg == 0 => Some("Perfect match for your decaf preference"),
        "Caffeinated" if drink.caffeine_mg > 0 => Some("Provides the caffeine boost you prefer"),
        _ => None,
    }
}

fn adventure_reason(drink: &Drink, answer: &str) -> Option<&'static str> {
    let Ok(score) = answer.trim().parse::<i64>() else {
        log::debug!("skipping unparseable adventure answer '{answer}'");
        return None;
    };
    (score >= ADVENTUROUS_SCORE && ADVENTUROUS_CATEGORIES.contains(&drink.category.as_str()))
        .then_some("Perfect for your adventurous taste")
}

/// Closing phrase graded by the final score.
pub(crate) const fn confidence(score: f32) -> &'static str {
    if score >= 0.8 {
        "Highly recommended match"
    } else if score >= 0.6 {
        "Good match for your preferences"
    } else if score >= 0.4 {
        "Suitable option based on your profile"
    } else {
        "Potential match worth trying"
    }
}
