//! API Handlers
//!
//! HTTP request handlers for each recipes endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use crate::error::{RecipeError, Result};
use crate::models::{DeleteResponse, HealthResponse, Recipe, RecipeInput, SearchParams};
use crate::service::RecipeService;
use crate::store::RecipeStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Recipe operations over the configured store
    pub service: RecipeService,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self {
            service: RecipeService::new(store),
        }
    }
}

/// Runs a service call on the blocking pool.
///
/// Store calls may wait on database I/O, so they stay off the async workers.
async fn run_blocking<T, F>(service: &RecipeService, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&RecipeService) -> Result<T> + Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| RecipeError::Store(format!("store task failed: {}", e)))?
}

/// Handler for POST /recipes
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>> {
    let Json(input) = payload?;
    let recipe = run_blocking(&state.service, move |s| s.create(input)).await?;
    Ok(Json(recipe))
}

/// Handler for GET /recipes
pub async fn list_recipes_handler(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>> {
    let recipes = run_blocking(&state.service, |s| s.list()).await?;
    Ok(Json(recipes))
}

/// Handler for PUT /recipes/:id
///
/// The body is validated before the id is looked up, so a malformed body
/// is a 400 even for an unknown id.
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<Recipe>> {
    let Json(input) = payload?;
    let recipe = run_blocking(&state.service, move |s| s.update(&id, input)).await?;
    Ok(Json(recipe))
}

/// Handler for DELETE /recipes/:id
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    run_blocking(&state.service, move |s| s.delete(&id)).await?;
    Ok(Json(DeleteResponse::deleted()))
}

/// Handler for GET /recipes/search?tag=X
pub async fn search_recipes_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>> {
    let tag = params.tag.unwrap_or_default();
    let recipes = run_blocking(&state.service, move |s| s.search(&tag)).await?;
    Ok(Json(recipes))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()))
    }

    fn input(name: &str, tags: &[&str]) -> RecipeInput {
        RecipeInput {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list_handler() {
        let state = test_state();

        let created = create_recipe_handler(State(state.clone()), Ok(Json(input("Pasta", &[]))))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let listed = list_recipes_handler(State(state)).await.unwrap();
        assert_eq!(listed.0, vec![created.0]);
    }

    #[tokio::test]
    async fn test_update_handler_unknown_id() {
        let state = test_state();

        let result = update_recipe_handler(
            State(state),
            Path("missing".to_string()),
            Ok(Json(input("x", &[]))),
        )
        .await;
        assert!(matches!(result, Err(RecipeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        let created = create_recipe_handler(State(state.clone()), Ok(Json(input("Pasta", &[]))))
            .await
            .unwrap();

        let response = delete_recipe_handler(State(state.clone()), Path(created.id.clone()))
            .await
            .unwrap();
        assert_eq!(response.message, "Recipe has been deleted");

        let result = delete_recipe_handler(State(state), Path(created.id.clone())).await;
        assert!(matches!(result, Err(RecipeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_handler_missing_tag() {
        let state = test_state();
        create_recipe_handler(State(state.clone()), Ok(Json(input("Pasta", &["pasta"]))))
            .await
            .unwrap();

        let result = search_recipes_handler(State(state), Query(SearchParams { tag: None })).await;
        assert!(matches!(result, Err(RecipeError::Validation(_))));
    }

    #[tokio::test]
    async fn test_search_handler() {
        let state = test_state();
        create_recipe_handler(State(state.clone()), Ok(Json(input("Pasta", &["Pasta"]))))
            .await
            .unwrap();

        let found = search_recipes_handler(
            State(state),
            Query(SearchParams {
                tag: Some("AST".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
