// src/config.rs

use std::{env, time::Duration};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub max_lifetime: Duration,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Self {
            database_url: database_url(&lookup),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            max_connections,
            max_lifetime: Duration::from_secs(1800),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the `DB_*` parts.
fn database_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup("DATABASE_URL")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| {
            let part = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());
            format!(
                "postgresql://{}:{}@{}:{}/{}",
                part("DB_USER", "user"),
                part("DB_PASSWORD", "password"),
                part("DB_HOST", "localhost"),
                part("DB_PORT", "5432"),
                part("DB_NAME", "db"),
            )
        });
    normalize_database_url(&url)
}

/// Rewrites the legacy `postgres://` scheme (Heroku and friends) to `postgresql://`.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{rest}"),
        None => url.to_string(),
    }
}

/// Base URL of the analytics API, as seen by the dashboard client.
pub fn api_base_url() -> String {
    dotenvy::dotenv().ok();
    env::var("API_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.into())
}
