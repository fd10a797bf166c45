//! Request and Response models for the recipes API
//!
//! Defines the recipe entity and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod recipe;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use recipe::Recipe;
pub use requests::{RecipeInput, SearchParams};
pub use responses::{DeleteResponse, HealthResponse};
