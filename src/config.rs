//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Which storage engine backs the recipe store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory, lost on restart
    Memory,
    /// SQLite database file at `Config::database_path`
    Sqlite,
}

impl StoreBackend {
    /// Parses a backend name, case-insensitively. Returns None for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Some(StoreBackend::Memory),
            "sqlite" | "db" => Some(StoreBackend::Sqlite),
            _ => None,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Storage engine for recipes
    pub store_backend: StoreBackend,
    /// SQLite database file, used by the sqlite backend only
    pub database_path: PathBuf,
    /// How long a database call waits on a locked database, in milliseconds
    pub database_busy_timeout_ms: u64,
    /// JSON file loaded into the store at startup, if any
    pub seed_file: Option<PathBuf>,
    /// Per-request deadline in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `STORE_BACKEND` - `memory` or `sqlite` (default: memory)
    /// - `DATABASE_PATH` - SQLite file path (default: recipes.db)
    /// - `DATABASE_BUSY_TIMEOUT_MS` - Lock wait in milliseconds (default: 5000)
    /// - `SEED_FILE` - Recipes JSON to bulk-load at startup (default: none)
    /// - `REQUEST_TIMEOUT_SECS` - Per-request deadline in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            store_backend: match env::var("STORE_BACKEND") {
                Ok(v) => StoreBackend::parse(&v).unwrap_or_else(|| {
                    warn!("Unknown STORE_BACKEND '{}', using memory", v);
                    defaults.store_backend
                }),
                Err(_) => defaults.store_backend,
            },
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            database_busy_timeout_ms: env::var("DATABASE_BUSY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.database_busy_timeout_ms),
            seed_file: env::var("SEED_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            store_backend: StoreBackend::Memory,
            database_path: PathBuf::from("recipes.db"),
            database_busy_timeout_ms: 5000,
            seed_file: None,
            request_timeout: 30,
        }
    }
}
