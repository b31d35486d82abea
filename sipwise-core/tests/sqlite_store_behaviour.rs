#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural tests for `SqliteStore` using rstest-bdd.

use std::{cell::RefCell, collections::BTreeSet, path::PathBuf};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sipwise_core::{
    CatalogReader, Drink, DrinkId, DrinkQuery, Feedback, FeedbackKind, FeedbackStore, Interaction,
    InteractionStore, PriceTier, QuizAnswer, QuizStore, SqliteStore, SqliteStoreError, UserId,
};
use tempfile::TempDir;

const REQUESTER: UserId = UserId(1);
const OTHER: UserId = UserId(2);

/// Shared state for SQLite store scenarios.
struct StoreWorld {
    temp_dir: TempDir,
    writer: RefCell<Option<SqliteStore>>,
    reader: RefCell<Option<SqliteStore>>,
    open_error: RefCell<Option<SqliteStoreError>>,
    drinks: RefCell<Vec<Drink>>,
    users: RefCell<Vec<UserId>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            writer: RefCell::new(None),
            reader: RefCell::new(None),
            open_error: RefCell::new(None),
            drinks: RefCell::new(Vec::new()),
            users: RefCell::new(Vec::new()),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("sipwise.db")
    }

    fn with_writer(&self, action: impl FnOnce(&SqliteStore)) {
        let borrowed = self.writer.borrow();
        let store = borrowed.as_ref().expect("database should be seeded first");
        action(store);
    }

    fn with_reader<T>(&self, action: impl FnOnce(&SqliteStore) -> T) -> T {
        let borrowed = self.reader.borrow();
        let store = borrowed
            .as_ref()
            .expect("database should be reopened first");
        action(store)
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

#[given("a seeded SQLite database with a cocktail and two coffees")]
fn seeded_database(world: &StoreWorld) {
    let store = SqliteStore::create(world.db_path()).expect("create database");
    for drink in [
        Drink::new(DrinkId(1), "Americano", "coffee", PriceTier::Budget).with_caffeine_mg(150),
        Drink::new(DrinkId(2), "Old Fashioned", "cocktail", PriceTier::Premium)
            .with_alcohol_percent(32.0),
        Drink::new(DrinkId(3), "Cappuccino", "coffee", PriceTier::Standard).with_caffeine_mg(130),
    ] {
        store.insert_drink(&drink).expect("insert drink");
    }
    world.writer.replace(Some(store));
}

#[given("another user who favourited both coffees")]
fn other_user_favourites(world: &StoreWorld) {
    world.with_writer(|store| {
        for drink in [DrinkId(1), DrinkId(3)] {
            store
                .upsert_interaction(&Interaction::new(OTHER, drink).favorite())
                .expect("insert interaction");
        }
    });
}

#[given("the requester left too sweet and love it feedback")]
fn requester_feedback(world: &StoreWorld) {
    world.with_writer(|store| {
        for kind in [FeedbackKind::TooSweet, FeedbackKind::LoveIt] {
            store
                .insert_feedback(&Feedback::new(REQUESTER, DrinkId(1), kind))
                .expect("insert feedback");
        }
    });
}

#[given("the requester answered the sweetness quiz question")]
fn requester_quiz(world: &StoreWorld) {
    world.with_writer(|store| {
        store
            .insert_quiz_answer(REQUESTER, &QuizAnswer::new("sweetness", "Very sweet"))
            .expect("insert quiz answer");
    });
}

#[given("an empty temporary directory")]
fn empty_directory(world: &StoreWorld) {
    assert!(!world.db_path().exists());
}

#[when("I reopen the database read-only")]
fn reopen(world: &StoreWorld) {
    world.writer.replace(None);
    let store = SqliteStore::open(world.db_path()).expect("open read-only");
    world.reader.replace(Some(store));
}

#[when("I query drinks excluding alcoholic ones")]
fn query_non_alcoholic(world: &StoreWorld) {
    let drinks = world.with_reader(|store| {
        store
            .drinks_matching(&DrinkQuery::new().excluding_alcoholic())
            .expect("query drinks")
    });
    world.drinks.replace(drinks);
}

#[when("I look up users who favourited the first coffee")]
fn lookup_favouriting_users(world: &StoreWorld) {
    let users = world.with_reader(|store| {
        store
            .favorited_by_others(&BTreeSet::from([DrinkId(1)]), REQUESTER, 10)
            .expect("read favourites")
    });
    world.users.replace(users);
}

#[when("I open a database that does not exist")]
fn open_missing(world: &StoreWorld) {
    match SqliteStore::open(world.db_path()) {
        Ok(store) => {
            world.reader.replace(Some(store));
        }
        Err(err) => {
            world.open_error.replace(Some(err));
        }
    }
}

#[then("only the two coffees are returned")]
fn only_coffees(world: &StoreWorld) {
    let drinks = world.drinks.borrow();
    let ids: Vec<_> = drinks.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![DrinkId(1), DrinkId(3)]);
    assert!(drinks.iter().all(|d| d.category == "coffee"));
}

#[then("the other user is returned")]
fn other_user_returned(world: &StoreWorld) {
    assert_eq!(*world.users.borrow(), vec![OTHER]);
}

#[then("their favourites contain both coffees")]
fn favourites_contain_coffees(world: &StoreWorld) {
    let favourites = world.with_reader(|store| store.favorites_of(&[OTHER]).expect("read"));
    assert_eq!(favourites, BTreeSet::from([DrinkId(1), DrinkId(3)]));
}

#[then("the requester's feedback kinds are too sweet then love it")]
fn feedback_in_order(world: &StoreWorld) {
    let kinds: Vec<_> = world.with_reader(|store| {
        store
            .feedback(REQUESTER)
            .expect("read feedback")
            .into_iter()
            .map(|f| f.kind)
            .collect()
    });
    assert_eq!(kinds, vec![FeedbackKind::TooSweet, FeedbackKind::LoveIt]);
}

#[then("the requester has one quiz answer")]
fn one_quiz_answer(world: &StoreWorld) {
    let answers = world.with_reader(|store| store.quiz_answers(REQUESTER).expect("read quiz"));
    assert_eq!(answers, vec![QuizAnswer::new("sweetness", "Very sweet")]);
}

#[then("opening fails with an open database error")]
fn open_fails(world: &StoreWorld) {
    let binding = world.open_error.borrow();
    let error = binding.as_ref().expect("an error should be recorded");
    assert!(matches!(error, SqliteStoreError::OpenDatabase { .. }));
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 0)]
fn age_gate_query(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 1)]
fn favourites_lookup(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 2)]
fn feedback_and_quiz(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_store.feature", index = 3)]
fn missing_database(world: StoreWorld) {
    let _ = world;
}
