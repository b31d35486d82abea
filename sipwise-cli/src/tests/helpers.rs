//! Test helpers for writing seed documents and seeded databases.

use super::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::seed::{SeedConfig, execute_seed};

pub(super) const REQUESTER: u64 = 1;
pub(super) const ICED_TEA: u64 = 1;
pub(super) const ESPRESSO: u64 = 2;
pub(super) const MOJITO: u64 = 3;
pub(super) const GREEN_TEA: u64 = 4;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A seed document with two teas, a coffee the requester dismissed and a
/// cocktail. The requester keeps the default preference profile.
pub(super) fn seed_document() -> Value {
    json!({
        "drinks": [
            {
                "id": ICED_TEA,
                "name": "Iced Tea",
                "category": "tea",
                "price_tier": "$$",
                "sweetness": 5,
                "caffeine_mg": 100,
                "sugar_g": 10.0
            },
            {
                "id": ESPRESSO,
                "name": "Espresso",
                "category": "coffee",
                "price_tier": "$",
                "sweetness": 2,
                "caffeine_mg": 212
            },
            {
                "id": MOJITO,
                "name": "Mojito",
                "category": "cocktail",
                "price_tier": "$$",
                "sweetness": 6,
                "alcohol_percent": 12.5,
                "ingredients": [{ "name": "rum" }, { "name": "mint" }]
            },
            {
                "id": GREEN_TEA,
                "name": "Green Tea",
                "category": "tea",
                "price_tier": "$$",
                "sweetness": 4,
                "caffeine_mg": 30
            }
        ],
        "profiles": [{ "user": REQUESTER, "profile": {} }],
        "interactions": [
            { "user_id": 2, "drink_id": ICED_TEA, "is_favorite": true }
        ],
        "feedback": [
            { "user_id": REQUESTER, "drink_id": ESPRESSO, "kind": "not_for_me" }
        ],
        "quiz_answers": [
            { "user": REQUESTER, "topic": "sweetness", "answer": "sweet" }
        ]
    })
}

/// A temporary directory holding `seed.json` and, once seeded, `sipwise.db`.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn seed_path(&self) -> Utf8PathBuf {
        self.root.join("seed.json")
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join("sipwise.db")
    }

    pub(super) fn write_seed(&self, document: &Value) {
        let payload = serde_json::to_string_pretty(document).expect("serialize seed");
        write_utf8(&self.seed_path(), payload.as_bytes());
    }

    pub(super) fn seed_config(&self) -> SeedConfig {
        SeedConfig {
            document: self.seed_path(),
            database: self.database(),
        }
    }

    /// Write the default seed document and build the database from it.
    pub(super) fn seeded() -> Self {
        let workspace = Self::new();
        workspace.write_seed(&seed_document());
        execute_seed(&workspace.seed_config()).expect("seed database");
        workspace
    }
}
