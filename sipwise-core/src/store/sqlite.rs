//! SQLite-backed implementation of every collaborator trait.
//!
//! Sets and opaque maps are stored as JSON text columns. Multi-value
//! predicates pass their ids as a JSON array expanded with `json_each`, so
//! no statement depends on the bound-parameter ceiling.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params, params_from_iter, types::Value};
use thiserror::Error;

use crate::{
    ActiveFilter, CatalogReader, Drink, DrinkId, DrinkQuery, Feedback, FeedbackKind, FeedbackStore,
    Ingredient, Interaction, InteractionStore, PreferenceProfile, PreferenceStore, PriceTier,
    QuizAnswer, QuizStore, TasteLevel, UserId,
};

use super::{StoreArea, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS drink (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    price_tier TEXT NOT NULL,
    sweetness INTEGER NOT NULL,
    caffeine_mg INTEGER NOT NULL,
    sugar_g REAL NOT NULL,
    calories INTEGER NOT NULL,
    alcohol_percent REAL
);
CREATE TABLE IF NOT EXISTS drink_ingredient (
    drink_id INTEGER NOT NULL REFERENCES drink(id),
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    is_allergen INTEGER NOT NULL,
    PRIMARY KEY (drink_id, position)
);
CREATE TABLE IF NOT EXISTS user_preference (
    user_id INTEGER PRIMARY KEY,
    sweetness INTEGER NOT NULL,
    bitterness INTEGER NOT NULL,
    caffeine_limit_mg INTEGER NOT NULL,
    sugar_limit_g REAL NOT NULL,
    calorie_limit INTEGER NOT NULL,
    price_tier TEXT NOT NULL,
    preferred_categories TEXT NOT NULL,
    time_sensitivity TEXT NOT NULL,
    mode_preferences TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS user_filter (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    is_active INTEGER NOT NULL,
    budget_tier TEXT,
    max_sweetness INTEGER,
    caffeine_min_mg INTEGER,
    caffeine_max_mg INTEGER,
    excluded_ingredients TEXT NOT NULL,
    excluded_categories TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS user_drink_interaction (
    user_id INTEGER NOT NULL,
    drink_id INTEGER NOT NULL REFERENCES drink(id),
    times_consumed INTEGER NOT NULL,
    is_favorite INTEGER NOT NULL,
    rating REAL NOT NULL,
    is_not_for_me INTEGER NOT NULL,
    viewed_at TEXT,
    last_consumed TEXT,
    PRIMARY KEY (user_id, drink_id)
);
CREATE TABLE IF NOT EXISTS user_feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    drink_id INTEGER NOT NULL REFERENCES drink(id),
    feedback_type TEXT NOT NULL,
    note TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS taste_quiz_result (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    category TEXT NOT NULL,
    answer TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_interaction_favorite
    ON user_drink_interaction (drink_id, is_favorite);
";

const DRINK_COLUMNS: &str =
    "id, name, category, price_tier, sweetness, caffeine_mg, sugar_g, calories, alcohol_percent";

const INGREDIENTS_SQL: &str =
    "SELECT name, is_allergen FROM drink_ingredient WHERE drink_id = ?1 ORDER BY position";

const INTERACTION_COLUMNS: &str = "user_id, drink_id, times_consumed, is_favorite, rating, \
     is_not_for_me, viewed_at, last_consumed";

/// Error raised when opening, reading or writing the SQLite store.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the schema failed.
    #[error("failed to apply schema: {source}")]
    ApplySchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A JSON column could not be encoded or decoded.
    #[error("invalid JSON in column {column}: {source}")]
    InvalidJson {
        /// Column holding the payload.
        column: &'static str,
        /// JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored value did not map onto the domain type.
    #[error("invalid value '{value}' in column {column}")]
    InvalidValue {
        /// Column holding the value.
        column: &'static str,
        /// Offending value.
        value: String,
    },
    /// Another thread panicked while holding the connection.
    #[error("SQLite connection mutex was poisoned")]
    Poisoned,
    /// Generic SQLite error when reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Collaborator store backed by a single SQLite connection.
///
/// Access to the connection is serialised behind a mutex, which makes the
/// store `Send + Sync`.
pub struct SqliteStore {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open an existing database read-only.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::OpenDatabase`] when the file cannot be
    /// opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteStoreError> {
        Self::connect(path.as_ref(), OpenFlags::SQLITE_OPEN_READ_ONLY)
    }

    /// Create (or open for writing) a database and apply the schema.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the file cannot be opened or the
    /// schema cannot be applied.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SqliteStoreError> {
        let store = Self::connect(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        store
            .lock()?
            .execute_batch(SCHEMA)
            .map_err(|source| SqliteStoreError::ApplySchema { source })?;
        log::debug!("applied schema to {}", store.path.display());
        Ok(store)
    }

    fn connect(path: &Path, flags: OpenFlags) -> Result<Self, SqliteStoreError> {
        let connection = Connection::open_with_flags(path, flags).map_err(|source| {
            SqliteStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            connection: Mutex::new(connection),
            path: path.to_path_buf(),
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Poisoned)
    }

    /// Insert or replace a drink and its ingredients.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the write fails.
    pub fn insert_drink(&self, drink: &Drink) -> Result<(), SqliteStoreError> {
        let mut connection = self.lock()?;
        let tx = connection.transaction()?;
        tx.execute(
            &format!(
                "INSERT OR REPLACE INTO drink ({DRINK_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                drink.id.get(),
                drink.name,
                drink.category,
                drink.price_tier.as_str(),
                drink.sweetness.get(),
                drink.caffeine_mg,
                drink.sugar_g,
                drink.calories,
                drink.alcohol_percent,
            ],
        )?;
        tx.execute(
            "DELETE FROM drink_ingredient WHERE drink_id = ?1",
            params![drink.id.get()],
        )?;
        for (position, ingredient) in drink.ingredients.iter().enumerate() {
            tx.execute(
                "INSERT INTO drink_ingredient (drink_id, position, name, is_allergen) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    drink.id.get(),
                    position,
                    ingredient.name,
                    ingredient.is_allergen
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert or replace a user's preference profile.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when encoding or the write fails.
    pub fn upsert_profile(
        &self,
        user: UserId,
        profile: &PreferenceProfile,
    ) -> Result<(), SqliteStoreError> {
        let categories = to_json("preferred_categories", &profile.preferred_categories)?;
        let time_rules = to_json("time_sensitivity", &profile.time_sensitivity)?;
        let modes = to_json("mode_preferences", &profile.mode_preferences)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO user_preference (user_id, sweetness, bitterness, \
             caffeine_limit_mg, sugar_limit_g, calorie_limit, price_tier, \
             preferred_categories, time_sensitivity, mode_preferences) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                user.get(),
                profile.sweetness.get(),
                profile.bitterness.get(),
                profile.caffeine_limit_mg,
                profile.sugar_limit_g,
                profile.calorie_limit,
                profile.preferred_price_tier.as_str(),
                categories,
                time_rules,
                modes,
            ],
        )?;
        Ok(())
    }

    /// Make `filter` the user's only active filter.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when encoding or the write fails.
    pub fn activate_filter(
        &self,
        user: UserId,
        filter: &ActiveFilter,
    ) -> Result<(), SqliteStoreError> {
        let ingredients = to_json("excluded_ingredients", &filter.excluded_ingredients)?;
        let categories = to_json("excluded_categories", &filter.excluded_categories)?;
        let mut connection = self.lock()?;
        let tx = connection.transaction()?;
        tx.execute(
            "UPDATE user_filter SET is_active = 0 WHERE user_id = ?1",
            params![user.get()],
        )?;
        tx.execute(
            "INSERT INTO user_filter (user_id, is_active, budget_tier, max_sweetness, \
             caffeine_min_mg, caffeine_max_mg, excluded_ingredients, excluded_categories) \
             VALUES (?1, 1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.get(),
                filter.budget_tier.map(PriceTier::as_str),
                filter.max_sweetness.map(TasteLevel::get),
                filter.caffeine_min_mg,
                filter.caffeine_max_mg,
                ingredients,
                categories,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Insert or replace an interaction record.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the write fails.
    pub fn upsert_interaction(&self, interaction: &Interaction) -> Result<(), SqliteStoreError> {
        self.lock()?.execute(
            &format!(
                "INSERT OR REPLACE INTO user_drink_interaction ({INTERACTION_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ),
            params![
                interaction.user_id.get(),
                interaction.drink_id.get(),
                interaction.times_consumed,
                interaction.is_favorite,
                interaction.rating,
                interaction.is_not_for_me,
                interaction.viewed_at,
                interaction.last_consumed,
            ],
        )?;
        Ok(())
    }

    /// Append a feedback record.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the write fails.
    pub fn insert_feedback(&self, feedback: &Feedback) -> Result<(), SqliteStoreError> {
        self.lock()?.execute(
            "INSERT INTO user_feedback (user_id, drink_id, feedback_type, note, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                feedback.user_id.get(),
                feedback.drink_id.get(),
                feedback.kind.as_str(),
                feedback.note,
                feedback.created_at,
            ],
        )?;
        Ok(())
    }

    /// Append a quiz answer for `user`.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the write fails.
    pub fn insert_quiz_answer(
        &self,
        user: UserId,
        answer: &QuizAnswer,
    ) -> Result<(), SqliteStoreError> {
        self.lock()?.execute(
            "INSERT INTO taste_quiz_result (user_id, category, answer) VALUES (?1, ?2, ?3)",
            params![user.get(), answer.topic, answer.answer],
        )?;
        Ok(())
    }

    fn load_drinks(&self, query: &DrinkQuery) -> Result<Vec<Drink>, SqliteStoreError> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if query.exclude_alcoholic {
            clauses.push("alcohol_percent IS NULL");
        }
        if let Some(tier) = query.price_tier {
            clauses.push("price_tier = ?");
            values.push(Value::Text(tier.as_str().to_owned()));
        }
        if let Some(category) = &query.category {
            clauses.push("category = ?");
            values.push(Value::Text(category.clone()));
        }
        if let Some(min) = query.min_sweetness {
            clauses.push("sweetness >= ?");
            values.push(Value::Integer(i64::from(min.get())));
        }
        if let Some(max) = query.max_sweetness {
            clauses.push("sweetness <= ?");
            values.push(Value::Integer(i64::from(max.get())));
        }
        if let Some(min) = query.caffeine_min_mg {
            clauses.push("caffeine_mg >= ?");
            values.push(Value::Integer(i64::from(min)));
        }
        if let Some(max) = query.caffeine_max_mg {
            clauses.push("caffeine_mg <= ?");
            values.push(Value::Integer(i64::from(max)));
        }
        if !query.excluded_ids.is_empty() {
            clauses.push("id NOT IN (SELECT value FROM json_each(?))");
            let ids: Vec<u64> = query.excluded_ids.iter().map(|id| id.get()).collect();
            values.push(Value::Text(to_json("excluded_ids", &ids)?));
        }
        let filter = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        values.push(Value::Integer(
            i64::try_from(query.limit).unwrap_or(i64::MAX),
        ));
        let sql = format!("SELECT {DRINK_COLUMNS} FROM drink{filter} ORDER BY id LIMIT ?");

        let connection = self.lock()?;
        let mut statement = connection.prepare(&sql)?;
        let mut rows = statement.query(params_from_iter(values))?;
        let mut drinks = Vec::new();
        while let Some(row) = rows.next()? {
            drinks.push(read_drink(row)?);
        }
        for drink in &mut drinks {
            drink.ingredients = load_ingredients(&connection, drink.id)?;
        }
        Ok(drinks)
    }

    fn load_drink(&self, id: DrinkId) -> Result<Option<Drink>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement =
            connection.prepare_cached(&format!("SELECT {DRINK_COLUMNS} FROM drink WHERE id = ?1"))?;
        let mut rows = statement.query(params![id.get()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let mut drink = read_drink(row)?;
        drink.ingredients = load_ingredients(&connection, id)?;
        Ok(Some(drink))
    }

    fn load_categories(&self) -> Result<Vec<String>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement =
            connection.prepare_cached("SELECT DISTINCT category FROM drink ORDER BY category")?;
        let categories = statement
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(categories)
    }

    fn load_profile(&self, user: UserId) -> Result<Option<PreferenceProfile>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "SELECT sweetness, bitterness, caffeine_limit_mg, sugar_limit_g, calorie_limit, \
             price_tier, preferred_categories, time_sensitivity, mode_preferences \
             FROM user_preference WHERE user_id = ?1",
        )?;
        let mut rows = statement.query(params![user.get()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let categories: String = row.get(6)?;
        let time_rules: String = row.get(7)?;
        let modes: String = row.get(8)?;
        Ok(Some(PreferenceProfile {
            sweetness: taste_level("sweetness", row.get(0)?)?,
            bitterness: taste_level("bitterness", row.get(1)?)?,
            caffeine_limit_mg: row.get(2)?,
            sugar_limit_g: row.get(3)?,
            calorie_limit: row.get(4)?,
            preferred_price_tier: price_tier("price_tier", &row.get::<_, String>(5)?)?,
            preferred_categories: from_json::<BTreeSet<String>>("preferred_categories", &categories)?,
            time_sensitivity: from_json::<BTreeMap<String, String>>("time_sensitivity", &time_rules)?,
            mode_preferences: from_json::<BTreeMap<String, bool>>("mode_preferences", &modes)?,
        }))
    }

    fn load_active_filter(&self, user: UserId) -> Result<Option<ActiveFilter>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "SELECT budget_tier, max_sweetness, caffeine_min_mg, caffeine_max_mg, \
             excluded_ingredients, excluded_categories FROM user_filter \
             WHERE user_id = ?1 AND is_active = 1 ORDER BY id DESC LIMIT 1",
        )?;
        let mut rows = statement.query(params![user.get()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let budget_tier = row
            .get::<_, Option<String>>(0)?
            .map(|tier| price_tier("budget_tier", &tier))
            .transpose()?;
        let max_sweetness = row
            .get::<_, Option<u8>>(1)?
            .map(|level| taste_level("max_sweetness", level))
            .transpose()?;
        let ingredients: String = row.get(4)?;
        let categories: String = row.get(5)?;
        Ok(Some(ActiveFilter {
            budget_tier,
            max_sweetness,
            caffeine_min_mg: row.get(2)?,
            caffeine_max_mg: row.get(3)?,
            excluded_ingredients: from_json("excluded_ingredients", &ingredients)?,
            excluded_categories: from_json("excluded_categories", &categories)?,
        }))
    }

    fn load_interactions(&self, user: UserId) -> Result<Vec<Interaction>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(&format!(
            "SELECT {INTERACTION_COLUMNS} FROM user_drink_interaction \
             WHERE user_id = ?1 ORDER BY drink_id"
        ))?;
        let interactions = statement
            .query_map(params![user.get()], read_interaction)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(interactions)
    }

    fn load_interaction(
        &self,
        user: UserId,
        drink: DrinkId,
    ) -> Result<Option<Interaction>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(&format!(
            "SELECT {INTERACTION_COLUMNS} FROM user_drink_interaction \
             WHERE user_id = ?1 AND drink_id = ?2"
        ))?;
        let interaction = statement
            .query_row(params![user.get(), drink.get()], read_interaction)
            .optional()?;
        Ok(interaction)
    }

    fn load_favoriting_users(
        &self,
        drinks: &BTreeSet<DrinkId>,
        excluding: UserId,
        limit: usize,
    ) -> Result<Vec<UserId>, SqliteStoreError> {
        if drinks.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let ids: Vec<u64> = drinks.iter().map(|id| id.get()).collect();
        let ids = to_json("drink_ids", &ids)?;
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "SELECT DISTINCT user_id FROM user_drink_interaction \
             WHERE is_favorite = 1 AND user_id != ?1 \
             AND drink_id IN (SELECT value FROM json_each(?2)) \
             ORDER BY user_id LIMIT ?3",
        )?;
        let users = statement
            .query_map(
                params![
                    excluding.get(),
                    ids,
                    i64::try_from(limit).unwrap_or(i64::MAX)
                ],
                |row| row.get(0).map(UserId),
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn load_favorites_of(&self, users: &[UserId]) -> Result<BTreeSet<DrinkId>, SqliteStoreError> {
        if users.is_empty() {
            return Ok(BTreeSet::new());
        }
        let ids: Vec<u64> = users.iter().map(|id| id.get()).collect();
        let ids = to_json("user_ids", &ids)?;
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "SELECT DISTINCT drink_id FROM user_drink_interaction \
             WHERE is_favorite = 1 AND user_id IN (SELECT value FROM json_each(?1))",
        )?;
        let drinks = statement
            .query_map(params![ids], |row| row.get(0).map(DrinkId))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(drinks)
    }

    fn load_feedback(&self, user: UserId) -> Result<Vec<Feedback>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "SELECT drink_id, feedback_type, note, created_at FROM user_feedback \
             WHERE user_id = ?1 ORDER BY id",
        )?;
        let mut rows = statement.query(params![user.get()])?;
        let mut feedback = Vec::new();
        while let Some(row) = rows.next()? {
            let raw_kind: String = row.get(1)?;
            let kind = raw_kind
                .parse::<FeedbackKind>()
                .map_err(|_| SqliteStoreError::InvalidValue {
                    column: "feedback_type",
                    value: raw_kind.clone(),
                })?;
            feedback.push(Feedback {
                user_id: user,
                drink_id: DrinkId(row.get(0)?),
                kind,
                note: row.get(2)?,
                created_at: row.get(3)?,
            });
        }
        Ok(feedback)
    }

    fn load_quiz_answers(&self, user: UserId) -> Result<Vec<QuizAnswer>, SqliteStoreError> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "SELECT category, answer FROM taste_quiz_result WHERE user_id = ?1 ORDER BY id",
        )?;
        let answers = statement
            .query_map(params![user.get()], |row| {
                Ok(QuizAnswer::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(answers)
    }
}

fn read_drink(row: &Row<'_>) -> Result<Drink, SqliteStoreError> {
    let tier: String = row.get(3)?;
    Ok(Drink {
        id: DrinkId(row.get(0)?),
        name: row.get(1)?,
        category: row.get(2)?,
        price_tier: price_tier("price_tier", &tier)?,
        sweetness: taste_level("sweetness", row.get(4)?)?,
        caffeine_mg: row.get(5)?,
        sugar_g: row.get(6)?,
        calories: row.get(7)?,
        alcohol_percent: row.get(8)?,
        ingredients: Vec::new(),
    })
}

fn read_interaction(row: &Row<'_>) -> rusqlite::Result<Interaction> {
    Ok(Interaction {
        user_id: UserId(row.get(0)?),
        drink_id: DrinkId(row.get(1)?),
        times_consumed: row.get(2)?,
        is_favorite: row.get(3)?,
        rating: row.get(4)?,
        is_not_for_me: row.get(5)?,
        viewed_at: row.get(6)?,
        last_consumed: row.get(7)?,
    })
}

fn load_ingredients(
    connection: &Connection,
    drink: DrinkId,
) -> Result<Vec<Ingredient>, SqliteStoreError> {
    let mut statement = connection.prepare_cached(INGREDIENTS_SQL)?;
    let ingredients = statement
        .query_map(params![drink.get()], |row| {
            Ok(Ingredient {
                name: row.get(0)?,
                is_allergen: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ingredients)
}

fn taste_level(column: &'static str, raw: u8) -> Result<TasteLevel, SqliteStoreError> {
    TasteLevel::new(raw).map_err(|_| SqliteStoreError::InvalidValue {
        column,
        value: raw.to_string(),
    })
}

fn price_tier(column: &'static str, raw: &str) -> Result<PriceTier, SqliteStoreError> {
    raw.parse().map_err(|_| SqliteStoreError::InvalidValue {
        column,
        value: raw.to_owned(),
    })
}

fn to_json<T: serde::Serialize + ?Sized>(
    column: &'static str,
    value: &T,
) -> Result<String, SqliteStoreError> {
    serde_json::to_string(value).map_err(|source| SqliteStoreError::InvalidJson { column, source })
}

fn from_json<T: serde::de::DeserializeOwned>(
    column: &'static str,
    raw: &str,
) -> Result<T, SqliteStoreError> {
    serde_json::from_str(raw).map_err(|source| SqliteStoreError::InvalidJson { column, source })
}

fn fail(area: StoreArea) -> impl FnOnce(SqliteStoreError) -> StoreError {
    move |err| StoreError::with_source(area, err)
}

impl CatalogReader for SqliteStore {
    fn drinks_matching(&self, query: &DrinkQuery) -> Result<Vec<Drink>, StoreError> {
        self.load_drinks(query).map_err(fail(StoreArea::Catalog))
    }

    fn drink(&self, id: DrinkId) -> Result<Option<Drink>, StoreError> {
        self.load_drink(id).map_err(fail(StoreArea::Catalog))
    }

    fn categories(&self) -> Result<Vec<String>, StoreError> {
        self.load_categories().map_err(fail(StoreArea::Catalog))
    }
}

impl PreferenceStore for SqliteStore {
    fn profile(&self, user: UserId) -> Result<Option<PreferenceProfile>, StoreError> {
        self.load_profile(user).map_err(fail(StoreArea::Preferences))
    }

    fn active_filter(&self, user: UserId) -> Result<Option<ActiveFilter>, StoreError> {
        self.load_active_filter(user)
            .map_err(fail(StoreArea::Preferences))
    }
}

impl InteractionStore for SqliteStore {
    fn interactions(&self, user: UserId) -> Result<Vec<Interaction>, StoreError> {
        self.load_interactions(user)
            .map_err(fail(StoreArea::Interactions))
    }

    fn interaction(
        &self,
        user: UserId,
        drink: DrinkId,
    ) -> Result<Option<Interaction>, StoreError> {
        self.load_interaction(user, drink)
            .map_err(fail(StoreArea::Interactions))
    }

    fn favorited_by_others(
        &self,
        drinks: &BTreeSet<DrinkId>,
        excluding: UserId,
        limit: usize,
    ) -> Result<Vec<UserId>, StoreError> {
        self.load_favoriting_users(drinks, excluding, limit)
            .map_err(fail(StoreArea::Interactions))
    }

    fn favorites_of(&self, users: &[UserId]) -> Result<BTreeSet<DrinkId>, StoreError> {
        self.load_favorites_of(users)
            .map_err(fail(StoreArea::Interactions))
    }
}

impl FeedbackStore for SqliteStore {
    fn feedback(&self, user: UserId) -> Result<Vec<Feedback>, StoreError> {
        self.load_feedback(user).map_err(fail(StoreArea::Feedback))
    }
}

impl QuizStore for SqliteStore {
    fn quiz_answers(&self, user: UserId) -> Result<Vec<QuizAnswer>, StoreError> {
        self.load_quiz_answers(user).map_err(fail(StoreArea::Quiz))
    }
}
