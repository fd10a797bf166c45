//! SQLite recipe store
//!
//! One `recipes` table; list-valued columns hold JSON arrays and timestamps
//! are RFC 3339 text with nanosecond precision, so both round-trip exactly.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::debug;

use crate::error::{RecipeError, Result};
use crate::models::Recipe;
use crate::store::RecipeStore;

const SELECT_COLUMNS: &str =
    "SELECT id, name, tags, ingredients, instructions, published_at FROM recipes";

/// Raw column values as read from a row, decoded by [`RecipeRow::into_recipe`].
struct RecipeRow {
    id: String,
    name: String,
    tags: String,
    ingredients: String,
    instructions: String,
    published_at: String,
}

impl RecipeRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            tags: row.get(2)?,
            ingredients: row.get(3)?,
            instructions: row.get(4)?,
            published_at: row.get(5)?,
        })
    }

    fn into_recipe(self) -> Result<Recipe> {
        let published_at = DateTime::parse_from_rfc3339(&self.published_at)
            .map_err(|e| {
                RecipeError::Store(format!("bad published_at for {}: {}", self.id, e))
            })?
            .with_timezone(&Utc);

        Ok(Recipe {
            tags: serde_json::from_str(&self.tags)?,
            ingredients: serde_json::from_str(&self.ingredients)?,
            instructions: serde_json::from_str(&self.instructions)?,
            id: self.id,
            name: self.name,
            published_at,
        })
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn map_insert_error(err: rusqlite::Error, id: &str) -> RecipeError {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            RecipeError::Store(format!("duplicate recipe id: {}", id))
        }
        _ => err.into(),
    }
}

// == SQLite Store ==
/// Recipe store backed by a SQLite database.
///
/// `rusqlite::Connection` is not `Sync`, so the single connection sits
/// behind a `Mutex`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and creates the table if absent.
    ///
    /// `busy_timeout` bounds how long a call waits on a locked database.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.busy_timeout(busy_timeout)?;
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                tags TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                instructions TEXT NOT NULL,
                published_at TEXT NOT NULL
            )",
            [],
        )?;
        debug!("recipes table ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RecipeError::Store("database connection lock poisoned".to_string()))
    }

    fn insert_row(conn: &Connection, recipe: &Recipe) -> Result<()> {
        conn.execute(
            "INSERT INTO recipes (id, name, tags, ingredients, instructions, published_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                recipe.id,
                recipe.name,
                serde_json::to_string(&recipe.tags)?,
                serde_json::to_string(&recipe.ingredients)?,
                serde_json::to_string(&recipe.instructions)?,
                format_timestamp(&recipe.published_at),
            ],
        )
        .map_err(|e| map_insert_error(e, &recipe.id))?;
        Ok(())
    }

    fn select_all(conn: &Connection) -> Result<Vec<Recipe>> {
        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], RecipeRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(RecipeRow::into_recipe).collect()
    }

    fn select_one(conn: &Connection, id: &str) -> Result<Recipe> {
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id],
            RecipeRow::from_row,
        )
        .optional()?
        .ok_or_else(|| RecipeError::NotFound(id.to_string()))?
        .into_recipe()
    }
}

impl RecipeStore for SqliteStore {
    fn insert(&self, recipe: Recipe) -> Result<Recipe> {
        let conn = self.lock()?;
        Self::insert_row(&conn, &recipe)?;
        Ok(recipe)
    }

    fn list(&self) -> Result<Vec<Recipe>> {
        let conn = self.lock()?;
        Self::select_all(&conn)
    }

    fn find_by_id(&self, id: &str) -> Result<Recipe> {
        let conn = self.lock()?;
        Self::select_one(&conn, id)
    }

    fn update(&self, id: &str, recipe: Recipe) -> Result<Recipe> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE recipes
             SET name = ?2, tags = ?3, ingredients = ?4, instructions = ?5
             WHERE id = ?1",
            params![
                id,
                recipe.name,
                serde_json::to_string(&recipe.tags)?,
                serde_json::to_string(&recipe.ingredients)?,
                serde_json::to_string(&recipe.instructions)?,
            ],
        )?;

        if changed == 0 {
            return Err(RecipeError::NotFound(id.to_string()));
        }
        Self::select_one(&conn, id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM recipes WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(RecipeError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn scan(&self, predicate: &dyn Fn(&Recipe) -> bool) -> Result<Vec<Recipe>> {
        // Tags are JSON text, so filtering happens after decoding
        let conn = self.lock()?;
        let mut recipes = Self::select_all(&conn)?;
        recipes.retain(|r| predicate(r));
        Ok(recipes)
    }

    fn replace_all(&self, recipes: Vec<Recipe>) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM recipes", [])?;
        for recipe in &recipes {
            Self::insert_row(&tx, recipe)?;
        }
        tx.commit()?;

        Ok(recipes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, name: &str, tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec!["200g flour".to_string(), "2 eggs".to_string()],
            instructions: vec!["Mix, then rest".to_string(), "Bake \"hot\"".to_string()],
            published_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_find_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = recipe("a", "Pasta", &["Italian", "pâtes"]);
        store.insert(original.clone()).unwrap();

        let found = store.find_by_id("a").unwrap();
        assert_eq!(found, original);
    }

    #[test]
    fn test_insert_duplicate_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(recipe("a", "Pasta", &[])).unwrap();

        let result = store.insert(recipe("a", "Other", &[]));
        assert!(matches!(result, Err(RecipeError::Store(_))));
    }

    #[test]
    fn test_find_nonexistent() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            store.find_by_id("missing"),
            Err(RecipeError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_is_stable() {
        let store = SqliteStore::open_in_memory().unwrap();
        for id in ["c", "a", "b"] {
            store.insert(recipe(id, id, &[])).unwrap();
        }

        let first: Vec<String> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        let second: Vec<String> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(first, vec!["c", "a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_full_replace() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = store.insert(recipe("a", "Pasta", &["italian"])).unwrap();

        let mut replacement = recipe("other", "Cake", &[]);
        replacement.instructions.clear();
        replacement.published_at = Utc::now() + chrono::Duration::days(1);

        let updated = store.update("a", replacement).unwrap();
        assert_eq!(updated.id, "a");
        assert_eq!(updated.published_at, original.published_at);
        assert_eq!(updated.name, "Cake");
        assert!(updated.tags.is_empty());
        assert!(updated.instructions.is_empty());
        assert!(store.find_by_id("other").is_err());
    }

    #[test]
    fn test_update_and_delete_nonexistent() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            store.update("missing", recipe("missing", "x", &[])),
            Err(RecipeError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("missing"),
            Err(RecipeError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(recipe("a", "Pasta", &[])).unwrap();
        store.delete("a").unwrap();

        assert!(matches!(store.find_by_id("a"), Err(RecipeError::NotFound(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_scan() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(recipe("a", "Pasta", &["italian"])).unwrap();
        store.insert(recipe("b", "Cake", &["dessert"])).unwrap();

        let found = store.scan(&|r: &Recipe| r.name.starts_with('C')).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b");
    }

    #[test]
    fn test_replace_all_is_atomic() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(recipe("old", "Old", &[])).unwrap();

        let result = store.replace_all(vec![recipe("x", "X", &[]), recipe("x", "X2", &[])]);
        assert!(matches!(result, Err(RecipeError::Store(_))));
        assert!(store.find_by_id("old").is_ok(), "failed batch must roll back");

        let count = store
            .replace_all(vec![recipe("x", "X", &[]), recipe("y", "Y", &[])])
            .unwrap();
        assert_eq!(count, 2);
        assert!(store.find_by_id("old").is_err());
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.db");

        {
            let store = SqliteStore::open(&path, Duration::from_secs(1)).unwrap();
            store.insert(recipe("a", "Pasta", &["italian"])).unwrap();
        }

        let store = SqliteStore::open(&path, Duration::from_secs(1)).unwrap();
        assert_eq!(store.find_by_id("a").unwrap().name, "Pasta");
    }
}
