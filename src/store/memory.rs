//! In-memory recipe store
//!
//! An insertion-ordered `Vec` behind a single `RwLock`.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{RecipeError, Result};
use crate::models::Recipe;
use crate::store::RecipeStore;

// == Memory Store ==
/// Recipe store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Recipe>>> {
        self.recipes
            .read()
            .map_err(|_| RecipeError::Store("recipe store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Recipe>>> {
        self.recipes
            .write()
            .map_err(|_| RecipeError::Store("recipe store lock poisoned".to_string()))
    }

    // == Length ==
    /// Returns the number of stored recipes.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}

impl RecipeStore for MemoryStore {
    fn insert(&self, recipe: Recipe) -> Result<Recipe> {
        let mut recipes = self.write()?;
        if recipes.iter().any(|r| r.id == recipe.id) {
            return Err(RecipeError::Store(format!(
                "duplicate recipe id: {}",
                recipe.id
            )));
        }
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    fn list(&self) -> Result<Vec<Recipe>> {
        Ok(self.read()?.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Recipe> {
        self.read()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))
    }

    fn update(&self, id: &str, recipe: Recipe) -> Result<Recipe> {
        let mut recipes = self.write()?;
        let existing = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;

        existing.replace_contents(recipe);
        Ok(existing.clone())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut recipes = self.write()?;
        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;

        // Vec::remove keeps the remaining records in insertion order
        recipes.remove(index);
        Ok(())
    }

    fn scan(&self, predicate: &dyn Fn(&Recipe) -> bool) -> Result<Vec<Recipe>> {
        Ok(self
            .read()?
            .iter()
            .filter(|&r| predicate(r))
            .cloned()
            .collect())
    }

    fn replace_all(&self, batch: Vec<Recipe>) -> Result<usize> {
        let mut seen = HashSet::with_capacity(batch.len());
        for recipe in &batch {
            if !seen.insert(recipe.id.as_str()) {
                return Err(RecipeError::Store(format!(
                    "duplicate recipe id: {}",
                    recipe.id
                )));
            }
        }

        let count = batch.len();
        *self.write()? = batch;
        Ok(count)
    }
}
