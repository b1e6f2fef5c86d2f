// src/lib.rs

use std::sync::Arc;

use sqlx::PgPool;

pub mod analytics;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod queries;
pub mod routes;
pub mod telemetry;

use analytics::{AnalyticsSource, PgAnalytics};

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<dyn AnalyticsSource>,
}

impl AppState {
    pub fn new(analytics: impl AnalyticsSource + 'static) -> Self {
        Self { analytics: Arc::new(analytics) }
    }

    /// Postgres-backed state; `None` when the pool could not be created.
    pub fn postgres(pool: Option<PgPool>) -> Self {
        Self::new(PgAnalytics::new(pool))
    }
}
