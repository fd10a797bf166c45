//! Tag search predicate
//!
//! Case-insensitive substring match over a recipe's tags. Case folding maps
//! each character on its own, with no locale or context rules (so a final
//! `Σ` folds to `σ`, never `ς`).

use crate::models::Recipe;

/// Returns true if any tag of `recipe` contains `lower_tag`, ignoring case.
///
/// `lower_tag` must already be lowercased; see [`normalize_tag`].
pub fn matches(recipe: &Recipe, lower_tag: &str) -> bool {
    recipe
        .tags
        .iter()
        .any(|t| fold_case(t).contains(lower_tag))
}

/// Lowercases `s` one character at a time.
///
/// `str::to_lowercase` applies the word-final sigma rule, which would make
/// the same letter fold differently in a tag and in a search term.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Lowercases a search term. Returns None for an empty term.
pub fn normalize_tag(tag: &str) -> Option<String> {
    if tag.is_empty() {
        None
    } else {
        Some(fold_case(tag))
    }
}
