//! Store Module
//!
//! The persistence boundary for recipes. [`RecipeStore`] is implemented by an
//! in-memory collection and by a SQLite table; the service is written
//! against the trait only.

mod memory;
mod sqlite;


pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::Recipe;

/// Capability set shared by every storage engine.
///
/// Implementations guard their own state, so a store can be shared behind an
/// `Arc` and called concurrently. Calls are synchronous and may block on I/O.
pub trait RecipeStore: Send + Sync {
    /// Adds a fully populated record.
    ///
    /// Fails with `Store` if a record with the same id already exists.
    fn insert(&self, recipe: Recipe) -> Result<Recipe>;

    /// Returns every record. Insertion order for memory, rowid order for SQLite.
    fn list(&self) -> Result<Vec<Recipe>>;

    /// Returns the record with `id`, or `NotFound`.
    fn find_by_id(&self, id: &str) -> Result<Recipe>;

    /// Replaces the mutable fields of the record with `id` by those of
    /// `recipe`. The stored `id` and `published_at` are kept.
    fn update(&self, id: &str, recipe: Recipe) -> Result<Recipe>;

    /// Removes the record with `id`, or fails with `NotFound`.
    fn delete(&self, id: &str) -> Result<()>;

    /// Returns, in `list` order, the records for which `predicate` holds.
    fn scan(&self, predicate: &dyn Fn(&Recipe) -> bool) -> Result<Vec<Recipe>>;

    /// Discards all records and stores `recipes` instead.
    ///
    /// Either the whole batch is stored or the prior contents are left intact.
    /// Returns the number of records stored.
    fn replace_all(&self, recipes: Vec<Recipe>) -> Result<usize>;
}
