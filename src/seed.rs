//! Bulk Loader
//!
//! Loads a JSON array of recipes into a store at startup, replacing whatever
//! the store held before.

use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::error::{RecipeError, Result};
use crate::id::new_id;
use crate::models::RecipeInput;
use crate::store::RecipeStore;

/// Reads `path` and replaces the contents of `store` with its recipes.
///
/// Records without an id (or with an empty one) get a fresh id; records
/// without `publishedAt` get the current time. Supplied values are kept.
/// Returns the number of recipes loaded.
///
/// # Errors
/// - `Store` if the file cannot be read or the batch cannot be stored
/// - `Validation` if the file is not a JSON array of recipes
pub fn load_seed_file(path: impl AsRef<Path>, store: &dyn RecipeStore) -> Result<usize> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        RecipeError::Store(format!("reading {}: {}", path.display(), e))
    })?;

    let count = load_seed_json(&raw, store)?;
    info!(
        "Successfully loaded {} recipes from {} into store",
        count,
        path.display()
    );
    Ok(count)
}

/// Same as [`load_seed_file`] for JSON already in memory.
pub fn load_seed_json(raw: &str, store: &dyn RecipeStore) -> Result<usize> {
    let inputs: Vec<RecipeInput> = serde_json::from_str(raw)
        .map_err(|e| RecipeError::Validation(format!("parsing seed recipes: {}", e)))?;

    let recipes = inputs
        .into_iter()
        .map(|mut input| {
            let id = input
                .id
                .take()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(new_id);
            let published_at = input.published_at.take().unwrap_or_else(Utc::now);
            input.into_recipe(id, published_at)
        })
        .collect();

    store.replace_all(recipes)
}
