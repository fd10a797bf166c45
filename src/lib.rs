//! Recipes API - A CRUD server for recipes with tag search
//!
//! Recipes live in an in-memory store or a SQLite table behind the same
//! `RecipeStore` trait; `RecipeService` implements the operations.

pub mod api;
pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod search;
pub mod seed;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::{Config, StoreBackend};
pub use error::RecipeError;
pub use service::RecipeService;
