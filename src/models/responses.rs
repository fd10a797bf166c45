//! Response DTOs for the recipes API
//!
//! Recipes themselves are returned as-is; these cover the other bodies.

use serde::Serialize;

/// Response body for DELETE /recipes/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

impl DeleteResponse {
    /// Creates the standard deletion confirmation
    pub fn deleted() -> Self {
        Self {
            message: "Recipe has been deleted".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
