//! Request DTOs for the recipes API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::Recipe;

/// Request body for create (POST /recipes) and update (PUT /recipes/:id).
///
/// Every field is optional on the wire: an omitted or null list becomes
/// empty, an omitted or null name becomes an empty string. `id` and
/// `publishedAt` are accepted so that well-formed payloads echoing a stored
/// record still parse, but the service discards them. The bulk loader keeps
/// them when present. Only a JSON object is a valid payload.
#[derive(Debug, Clone, Default)]
pub struct RecipeInput {
    pub id: Option<String>,
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Wire shape of [`RecipeInput`]; `null` and absent are the same.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipeInput {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    instructions: Option<Vec<String>>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for RecipeInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Derived struct impls also take sequences; a recipe must be an object
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let raw = RawRecipeInput::deserialize(Value::Object(fields)).map_err(D::Error::custom)?;

        Ok(Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
            ingredients: raw.ingredients.unwrap_or_default(),
            instructions: raw.instructions.unwrap_or_default(),
            published_at: raw.published_at,
        })
    }
}

impl RecipeInput {
    /// Builds a record from this payload with the given identity, ignoring
    /// any `id` or `publishedAt` carried by the payload itself.
    pub fn into_recipe(self, id: String, published_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            name: self.name,
            tags: self.tags,
            ingredients: self.ingredients,
            instructions: self.instructions,
            published_at,
        }
    }
}

/// Query parameters for GET /recipes/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Tag substring to look for
    #[serde(default)]
    pub tag: Option<String>,
}
