//! Configuration management for the API server
//!
//! Configuration is read from environment variables (a `.env` file is
//! loaded first when present).
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 8080)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: `*`)
//! - `STORAGE_BACKEND`: `postgres` or `memory` (default: postgres)
//! - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
//! - `DATABASE_CREATE_IF_MISSING`: Create the database at startup when it
//!   does not exist; needs access to the maintenance database (default: false)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `DATABASE_MIN_CONNECTIONS`: Idle connections kept warm (default: 2)
//! - `DATABASE_CONNECT_TIMEOUT_SECONDS`: Acquire timeout (default: 30)
//! - `RUST_LOG`: Log filter
//! - `LOG_FORMAT`: `json` for JSON log lines
//!
//! # Example
//!
//! ```no_run
//! use rollcall_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use axum::http::HeaderValue;
use rollcall_shared::db::pool::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Which store backs the user repository
    pub storage: StorageBackend,

    /// Database configuration (used by the postgres backend)
    pub database: DatabaseConfig,

    /// Create the database at startup when it does not exist
    pub create_database: bool,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Store backing the user repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`
    Postgres,

    /// Process-local map; data is lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!("Unknown STORAGE_BACKEND: {}", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing while the postgres backend is selected
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// `from_env` is this function over the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 8080u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        if let Some(origin) = cors_origins
            .iter()
            .find(|origin| HeaderValue::from_str(origin).is_err())
        {
            anyhow::bail!("Invalid CORS_ORIGINS entry: {:?}", origin);
        }

        let storage = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::Postgres,
        };

        let url = lookup("DATABASE_URL").unwrap_or_default();
        if storage == StorageBackend::Postgres && url.is_empty() {
            anyhow::bail!("DATABASE_URL environment variable is required");
        }

        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_seconds: parse_or(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            )?,
            ..defaults
        };
        let create_database = parse_or(&lookup, "DATABASE_CREATE_IF_MISSING", false)?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            storage,
            database,
            create_database,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", key, e)),
        None => Ok(default),
    }
}
