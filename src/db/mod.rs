// src/db/mod.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::{config::Config, queries};

/// Builds the pool without opening a connection; connections are made on
/// first use. Only a malformed URL fails here.
pub fn connect(cfg: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .max_lifetime(cfg.max_lifetime)
        .test_before_acquire(true)
        .connect_lazy(&cfg.database_url)
}

/// Startup pool creation. A failure is logged and the service keeps running
/// without a database; every query then reports a failure.
pub fn init(cfg: &Config) -> Option<PgPool> {
    match connect(cfg) {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(error = %e, "failed to create database pool");
            None
        }
    }
}

pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(queries::PING).execute(pool).await?;
    Ok(())
}

/// Startup connectivity check; never fatal.
pub async fn check(pool: &PgPool) {
    match ping(pool).await {
        Ok(()) => info!("database connected"),
        Err(e) => warn!(error = %e, "database connection failed (non-fatal)"),
    }
}
