// src/analytics/postgres.rs

use async_trait::async_trait;
use sqlx::{query_as, PgPool};

use super::AnalyticsSource;
use crate::{
    db,
    error::{AppError, AppResult},
    models::{DelayCorrelation, RatingSummary},
    queries,
};

#[derive(Clone)]
pub struct PgAnalytics {
    pool: Option<PgPool>,
}

impl PgAnalytics {
    pub fn new(pool: Option<PgPool>) -> Self {
        Self { pool }
    }

    fn pool(&self) -> AppResult<&PgPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::query("database engine not initialized"))
    }
}

#[async_trait]
impl AnalyticsSource for PgAnalytics {
    async fn rating_summary(&self) -> AppResult<Vec<RatingSummary>> {
        // scoped connection: returned to the pool when `conn` drops
        let mut conn = self.pool()?.acquire().await?;
        let rows = query_as::<_, RatingSummary>(queries::RATING_SUMMARY)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn delay_correlation(&self) -> AppResult<Vec<DelayCorrelation>> {
        let mut conn = self.pool()?.acquire().await?;
        let rows = query_as::<_, DelayCorrelation>(queries::DELAY_CORRELATION)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(self.pool()?).await?;
        Ok(())
    }
}
