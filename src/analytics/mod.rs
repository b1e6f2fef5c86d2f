// src/analytics/mod.rs

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{DelayCorrelation, RatingSummary},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAnalytics;
pub use postgres::PgAnalytics;

/// Where the two aggregates come from. Handlers only see this trait.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn rating_summary(&self) -> AppResult<Vec<RatingSummary>>;

    async fn delay_correlation(&self) -> AppResult<Vec<DelayCorrelation>>;

    /// Cheap reachability probe for `/health`.
    async fn ping(&self) -> AppResult<()>;
}
