//! API Module
//!
//! HTTP handlers and routing for the recipes REST API.
//!
//! # Endpoints
//! - `POST /recipes` - Create a recipe
//! - `GET /recipes` - List all recipes
//! - `PUT /recipes/:id` - Replace a recipe
//! - `DELETE /recipes/:id` - Delete a recipe
//! - `GET /recipes/search?tag=X` - Search recipes by tag
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, create_router_with_timeout};
