#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural tests for `ExplanationGenerator` using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sipwise_core::{
    Drink, DrinkId, Explanation, FALLBACK_REASON, PreferenceProfile, PriceTier, QuizAnswer,
    StoreArea, StrategyLabel, UserId, test_support::MemoryStore,
};
use sipwise_explain::ExplanationGenerator;

const REQUESTER: UserId = UserId(1);

/// Shared state for explanation scenarios.
struct ExplainWorld {
    store: RefCell<MemoryStore>,
    drink: RefCell<Option<Drink>>,
    explanation: RefCell<Option<Explanation>>,
}

impl ExplainWorld {
    fn new() -> Self {
        Self {
            store: RefCell::new(MemoryStore::default()),
            drink: RefCell::new(None),
            explanation: RefCell::new(None),
        }
    }

    fn update_store(&self, update: impl FnOnce(MemoryStore) -> MemoryStore) {
        let current = self.store.take();
        self.store.replace(update(current));
    }

    fn explain(&self, label: StrategyLabel, score: f32) {
        let store = self.store.borrow();
        let chosen = self.drink.borrow();
        let drink = chosen.as_ref().expect("a drink should be chosen first");
        let explanation = ExplanationGenerator::new(&*store).explain(REQUESTER, drink, score, label);
        self.explanation.replace(Some(explanation));
    }

    fn reasons(&self) -> Vec<String> {
        self.explanation
            .borrow()
            .as_ref()
            .expect("an explanation should be generated first")
            .reasons()
            .to_vec()
    }
}

#[fixture]
fn world() -> ExplainWorld {
    ExplainWorld::new()
}

#[given("a requester who prefers coffee with a default profile")]
fn coffee_lover(world: &ExplainWorld) {
    world.update_store(|store| {
        store.with_profile(
            REQUESTER,
            PreferenceProfile::default().with_preferred_category("coffee"),
        )
    });
}

#[given("a budget americano")]
fn americano(world: &ExplainWorld) {
    let drink = Drink::new(DrinkId(1), "Americano", "coffee", PriceTier::Budget)
        .with_caffeine_mg(150)
        .with_calories(15);
    world.drink.replace(Some(drink));
}

#[given("an alcoholic espresso martini with no other signals")]
fn martini(world: &ExplainWorld) {
    let drink = Drink::new(DrinkId(2), "Espresso Martini", "cocktail", PriceTier::Premium)
        .with_caffeine_mg(80)
        .with_calories(250)
        .with_alcohol_percent(18.0);
    world.drink.replace(Some(drink));
}

#[given("the requester answered the budget quiz with {answer}")]
fn budget_answer(world: &ExplainWorld, answer: String) {
    let clean = answer.trim_matches('"').to_owned();
    world.update_store(|store| store.with_quiz_answer(REQUESTER, QuizAnswer::new("budget", clean)));
}

#[given("the quiz collaborator is unavailable")]
fn quiz_unavailable(world: &ExplainWorld) {
    world.update_store(|store| store.with_failure(StoreArea::Quiz));
}

#[when("the americano is explained with the hybrid label at score {score}")]
fn explain_americano(world: &ExplainWorld, score: f32) {
    world.explain(StrategyLabel::Hybrid, score);
}

#[when("the martini is explained with the content label at score {score}")]
fn explain_martini(world: &ExplainWorld, score: f32) {
    world.explain(StrategyLabel::Content, score);
}

#[then("the explanation has {count} reasons")]
fn reason_count(world: &ExplainWorld, count: usize) {
    assert_eq!(world.reasons().len(), count);
}

#[then("the first reason is {expected}")]
fn first_reason(world: &ExplainWorld, expected: String) {
    let reasons = world.reasons();
    assert_eq!(
        reasons.first().map(String::as_str),
        Some(expected.trim_matches('"'))
    );
}

#[then("the last reason is {expected}")]
fn last_reason(world: &ExplainWorld, expected: String) {
    let reasons = world.reasons();
    assert_eq!(
        reasons.last().map(String::as_str),
        Some(expected.trim_matches('"'))
    );
}

#[then("the explanation contains {expected}")]
fn contains_reason(world: &ExplainWorld, expected: String) {
    let wanted = expected.trim_matches('"');
    assert!(
        world.reasons().iter().any(|r| r == wanted),
        "missing '{wanted}' in {:?}",
        world.reasons()
    );
}

#[then("the explanation is the fallback")]
fn is_fallback(world: &ExplainWorld) {
    assert_eq!(world.reasons(), vec![FALLBACK_REASON]);
}

#[scenario(path = "tests/features/explanations.feature", index = 0)]
fn capped_reasons(world: ExplainWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/explanations.feature", index = 1)]
fn confidence_reason(world: ExplainWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/explanations.feature", index = 2)]
fn quiz_reason(world: ExplainWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/explanations.feature", index = 3)]
fn fallback_reason(world: ExplainWorld) {
    let _ = world;
}
