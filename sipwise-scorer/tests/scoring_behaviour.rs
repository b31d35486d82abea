#![expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural tests for the scoring strategies using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sipwise_core::{
    CandidateScorer, Drink, DrinkId, Feedback, FeedbackKind, Interaction, PreferenceProfile,
    PriceTier, ScoredCandidate, UserId, UserSignals, test_support::MemoryStore,
};
use sipwise_scorer::{CollaborativeScorer, ContentScorer, FeedbackAdjuster};

const REQUESTER: UserId = UserId(1);
const ICED_TEA: DrinkId = DrinkId(7);

/// Shared state for scoring scenarios.
struct ScoringWorld {
    signals: RefCell<UserSignals>,
    store: RefCell<MemoryStore>,
    pool: RefCell<Vec<Drink>>,
    scored: RefCell<Vec<ScoredCandidate>>,
}

impl ScoringWorld {
    fn new() -> Self {
        Self {
            signals: RefCell::new(UserSignals::empty(REQUESTER)),
            store: RefCell::new(MemoryStore::default()),
            pool: RefCell::new(Vec::new()),
            scored: RefCell::new(Vec::new()),
        }
    }

    fn update_signals(&self, update: impl FnOnce(UserSignals) -> UserSignals) {
        let current = self.signals.replace(UserSignals::empty(REQUESTER));
        self.signals.replace(update(current));
    }

    fn update_store(&self, update: impl FnOnce(MemoryStore) -> MemoryStore) {
        let current = self.store.take();
        self.store.replace(update(current));
    }
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::new()
}

#[given("a requester with a mid-range default profile")]
fn default_profile(world: &ScoringWorld) {
    world.update_signals(|signals| signals.with_profile(PreferenceProfile::default()));
}

#[given("an iced tea that fits every preference")]
fn fitting_iced_tea(world: &ScoringWorld) {
    let drink = Drink::new(ICED_TEA, "Iced Tea", "tea", PriceTier::Standard)
        .with_caffeine_mg(100)
        .with_sugar_g(10.0);
    world.pool.borrow_mut().push(drink);
}

#[given("the requester has favourited the iced tea")]
fn favourited(world: &ScoringWorld) {
    world.update_signals(|signals| {
        signals.with_interactions([Interaction::new(REQUESTER, ICED_TEA).favorite()])
    });
}

#[given("the requester marked the iced tea as not for them")]
fn dismissed(world: &ScoringWorld) {
    world.update_signals(|signals| {
        signals.with_feedback([Feedback::new(REQUESTER, ICED_TEA, FeedbackKind::NotForMe)])
    });
}

#[given("another user favourited the iced tea")]
fn other_user_favourite(world: &ScoringWorld) {
    world.update_store(|store| {
        store.with_interaction(Interaction::new(UserId(2), ICED_TEA).favorite())
    });
}

#[when("the content scorer runs")]
fn run_content(world: &ScoringWorld) {
    let scored = ContentScorer::default().score(&world.pool.borrow(), &world.signals.borrow());
    world.scored.replace(scored);
}

#[when("the collaborative scorer runs")]
fn run_collaborative(world: &ScoringWorld) {
    let store = world.store.borrow();
    let scored = CollaborativeScorer::new(&*store).score(&world.pool.borrow(), &world.signals.borrow());
    world.scored.replace(scored);
}

#[when("feedback adjustments are applied")]
fn apply_feedback(world: &ScoringWorld) {
    let scored = world.scored.take();
    let adjusted = FeedbackAdjuster::default().adjust(scored, &world.signals.borrow());
    world.scored.replace(adjusted);
}

#[then("the iced tea scores {expected}")]
fn iced_tea_scores(world: &ScoringWorld, expected: f32) {
    let scored = world.scored.borrow();
    let candidate = scored
        .iter()
        .find(|c| c.drink.id == ICED_TEA)
        .expect("iced tea should be scored");
    assert!(
        (candidate.score - expected).abs() < 1e-5,
        "expected {expected}, got {}",
        candidate.score
    );
}

#[then("no candidates are produced")]
fn nothing_produced(world: &ScoringWorld) {
    assert!(world.scored.borrow().is_empty());
}

#[scenario(path = "tests/features/scoring.feature", index = 0)]
fn perfect_fit(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 1)]
fn favourite_dampening(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 2)]
fn dismissal_penalty(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 3)]
fn no_history_no_collaboration(world: ScoringWorld) {
    let _ = world;
}
