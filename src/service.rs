//! Recipe Service
//!
//! The five recipe operations, written against [`RecipeStore`]. This is the
//! boundary the HTTP handlers call into; it holds no records of its own.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{RecipeError, Result};
use crate::id::new_id;
use crate::models::{Recipe, RecipeInput};
use crate::search;
use crate::store::RecipeStore;

// == Recipe Service ==
/// Orchestrates store calls, identifier assignment and search.
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    // == Create ==
    /// Stores a new recipe with a fresh id and the current time as
    /// `published_at`. Any id or timestamp in `input` is discarded.
    pub fn create(&self, input: RecipeInput) -> Result<Recipe> {
        let recipe = input.into_recipe(new_id(), Utc::now());
        let stored = self.store.insert(recipe)?;

        info!("Created recipe {} ({})", stored.id, stored.name);
        Ok(stored)
    }

    // == List ==
    /// Returns every stored recipe.
    pub fn list(&self) -> Result<Vec<Recipe>> {
        let recipes = self.store.list()?;
        debug!("Listed {} recipes", recipes.len());
        Ok(recipes)
    }

    // == Find ==
    /// Returns the recipe with `id`, or `NotFound`.
    pub fn find_by_id(&self, id: &str) -> Result<Recipe> {
        self.store.find_by_id(id)
    }

    // == Update ==
    /// Replaces every mutable field of recipe `id` with the values in `input`.
    ///
    /// This is a full replace: a field omitted from `input` is cleared. The
    /// stored `id` and `published_at` always win over those in `input`.
    pub fn update(&self, id: &str, input: RecipeInput) -> Result<Recipe> {
        let existing = self.store.find_by_id(id)?;
        let replacement = input.into_recipe(existing.id, existing.published_at);
        let updated = self.store.update(id, replacement)?;

        info!("Updated recipe {}", updated.id);
        Ok(updated)
    }

    // == Delete ==
    /// Removes recipe `id`, or fails with `NotFound`.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.find_by_id(id)?;
        self.store.delete(id)?;

        info!("Deleted recipe {}", id);
        Ok(())
    }

    // == Search ==
    /// Returns the recipes with at least one tag containing `tag`, ignoring
    /// case. An empty tag is rejected rather than matching everything.
    pub fn search(&self, tag: &str) -> Result<Vec<Recipe>> {
        let lower_tag = search::normalize_tag(tag)
            .ok_or_else(|| RecipeError::Validation("Tag is required".to_string()))?;

        let found = self
            .store
            .scan(&|recipe: &Recipe| search::matches(recipe, &lower_tag))?;

        debug!("Search for '{}' matched {} recipes", tag, found.len());
        Ok(found)
    }
}
