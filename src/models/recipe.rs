//! Recipe entity
//!
//! The single record type managed by the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored recipe.
///
/// `id` and `published_at` are assigned once at creation and never change.
/// The remaining fields are replaced wholesale by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, time-ordered identifier
    pub id: String,
    /// Free-text name
    pub name: String,
    /// Tags in display order
    pub tags: Vec<String>,
    /// Ingredients in display order
    pub ingredients: Vec<String>,
    /// Preparation steps in order
    pub instructions: Vec<String>,
    /// Creation time
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Copies every mutable field from `other`, keeping this record's
    /// `id` and `published_at`.
    pub fn replace_contents(&mut self, other: Recipe) {
        self.name = other.name;
        self.tags = other.tags;
        self.ingredients = other.ingredients;
        self.instructions = other.instructions;
    }
}
