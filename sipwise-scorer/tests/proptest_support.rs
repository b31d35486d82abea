//! Proptest strategies for scoring property tests.
//!
//! Generators produce valid catalog drinks and preference profiles so the
//! properties only exercise inputs the scorers accept.

use proptest::prelude::*;
use sipwise_core::{Drink, DrinkId, PreferenceProfile, PriceTier, TasteLevel};

/// Strategy for a level on the `1..=10` scale.
pub fn taste_level() -> impl Strategy<Value = TasteLevel> {
    (1_u8..=10).prop_filter_map("level in range", |value| TasteLevel::new(value).ok())
}

/// Strategy for any price tier.
pub fn price_tier() -> impl Strategy<Value = PriceTier> {
    prop_oneof![
        Just(PriceTier::Budget),
        Just(PriceTier::Standard),
        Just(PriceTier::Premium),
    ]
}

/// Strategy for a drink with the given id and arbitrary nutrition.
pub fn drink(id: u64) -> impl Strategy<Value = Drink> {
    (
        taste_level(),
        price_tier(),
        0_u32..=600,
        0_u16..=80,
        prop_oneof![Just("coffee"), Just("tea"), Just("smoothie"), Just("water")],
    )
        .prop_map(move |(sweetness, tier, caffeine, sugar, category)| {
            Drink::new(DrinkId(id), format!("Drink {id}"), category, tier)
                .with_sweetness(sweetness)
                .with_caffeine_mg(caffeine)
                .with_sugar_g(f32::from(sugar))
        })
}

/// Strategy for a pool of drinks with unique, ascending ids.
pub fn pool(max_len: usize) -> impl Strategy<Value = Vec<Drink>> {
    (1..=max_len).prop_flat_map(|len| {
        (1..=len)
            .map(|id| drink(u64::try_from(id).unwrap_or(u64::MAX)))
            .collect::<Vec<_>>()
    })
}

/// Strategy for a preference profile with arbitrary scalar preferences.
pub fn profile() -> impl Strategy<Value = PreferenceProfile> {
    (taste_level(), taste_level(), 0_u32..=600, 0_u16..=80, price_tier()).prop_map(
        |(sweetness, bitterness, caffeine, sugar, tier)| {
            PreferenceProfile::default()
                .with_sweetness(sweetness)
                .with_bitterness(bitterness)
                .with_caffeine_limit_mg(caffeine)
                .with_sugar_limit_g(f32::from(sugar))
                .with_price_tier(tier)
        },
    )
}
