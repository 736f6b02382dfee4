// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::error::AppError;

/// Number of questions in every quiz attempt.
pub const QUIZ_QUESTION_COUNT: usize = 20;

/// Leaderboard size when the client does not ask for one.
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

/// Which store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    /// Bearer token for the admin API. Admin routes are closed when unset.
    pub admin_token: Option<String>,
    pub refresh_on_startup: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => {
                let database_url = env::var("DATABASE_URL").map_err(|_| {
                    AppError::Configuration("DATABASE_URL must be set".to_string())
                })?;
                StorageBackend::Postgres { database_url }
            }
            "memory" => StorageBackend::Memory,
            other => {
                return Err(AppError::Configuration(format!(
                    "STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'",
                    other
                )));
            }
        };

        let port = parse_var("PORT", 5000)?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let admin_token = env::var("ADMIN_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let refresh_on_startup = parse_var("REFRESH_ON_STARTUP", true)?;

        Ok(Self {
            storage,
            port,
            rust_log,
            cors_origins,
            admin_token,
            refresh_on_startup,
        })
    }

    /// Settings for an in-memory instance, used by tests and local demos.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            port: 0,
            rust_log: "error".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            admin_token: None,
            refresh_on_startup: false,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} has an invalid value: '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
