// src/analytics/memory.rs
//
// In-process evaluation of the two warehouse aggregates over already-joined
// rows. Mirrors `queries::RATING_SUMMARY` and `queries::DELAY_CORRELATION`
// row for row, including NULL handling.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::AnalyticsSource;
use crate::{
    error::{AppError, AppResult},
    models::{delay_rate, ratio_round2, round2, DelayCorrelation, DeliveryStatus, RatingSummary},
    queries::MIN_GROUP_SIZE,
};

/// The order columns both aggregates filter and classify on.
#[derive(Debug, Clone)]
pub struct OrderDelivery {
    pub order_status: String,
    pub delivered_at: Option<NaiveDateTime>,
    pub estimated_at: Option<NaiveDateTime>,
}

impl OrderDelivery {
    fn qualifies(&self) -> bool {
        self.order_status == "delivered" && self.delivered_at.is_some()
    }

    /// Strictly after the estimate. Equal timestamps, or a missing estimate,
    /// count as on time (SQL comparison with NULL is not true).
    pub fn is_late(&self) -> bool {
        matches!((self.delivered_at, self.estimated_at), (Some(d), Some(e)) if d > e)
    }

    pub fn status(&self) -> DeliveryStatus {
        if self.is_late() {
            DeliveryStatus::LateDelivery
        } else {
            DeliveryStatus::OnTime
        }
    }
}

/// One row of `orders ⋈ order_reviews`.
#[derive(Debug, Clone)]
pub struct ReviewedOrder {
    pub order: OrderDelivery,
    pub review_score: i32,
}

/// One row of `orders ⋈ order_items ⋈ sellers ⋈ products`.
#[derive(Debug, Clone)]
pub struct ShippedItem {
    pub order: OrderDelivery,
    pub seller_city: Option<String>,
    pub seller_state: Option<String>,
    pub product_weight_g: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalytics {
    reviews: Vec<ReviewedOrder>,
    items: Vec<ShippedItem>,
    failure: Option<String>,
}

impl InMemoryAnalytics {
    pub fn new(reviews: Vec<ReviewedOrder>, items: Vec<ShippedItem>) -> Self {
        Self { reviews, items, failure: None }
    }

    /// Every call fails with `msg`, like a lost database connection.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self { failure: Some(msg.into()), ..Self::default() }
    }

    fn check(&self) -> AppResult<()> {
        match &self.failure {
            Some(msg) => Err(AppError::query(msg.clone())),
            None => Ok(()),
        }
    }
}

pub fn rating_summary(rows: &[ReviewedOrder]) -> Vec<RatingSummary> {
    let mut groups: BTreeMap<DeliveryStatus, (i64, i64)> = BTreeMap::new();
    for r in rows.iter().filter(|r| r.order.qualifies()) {
        let (sum, count) = groups.entry(r.order.status()).or_default();
        *sum += i64::from(r.review_score);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(status, (sum, count))| RatingSummary {
            delivery_status: status,
            avg_review_score: ratio_round2(sum, count),
            total_orders: count,
        })
        .collect()
}

#[derive(Default)]
struct CityAcc {
    total: i64,
    late: i64,
    weight_sum: f64,
    weight_n: u32,
}

pub fn delay_correlation(rows: &[ShippedItem]) -> Vec<DelayCorrelation> {
    let mut groups: BTreeMap<(Option<String>, Option<String>), CityAcc> = BTreeMap::new();
    for it in rows.iter().filter(|it| it.order.qualifies()) {
        let acc = groups
            .entry((it.seller_city.clone(), it.seller_state.clone()))
            .or_default();
        acc.total += 1;
        if it.order.is_late() {
            acc.late += 1;
        }
        if let Some(w) = it.product_weight_g {
            acc.weight_sum += w;
            acc.weight_n += 1;
        }
    }

    let mut out: Vec<DelayCorrelation> = groups
        .into_iter()
        .filter(|(_, acc)| acc.total > MIN_GROUP_SIZE)
        .map(|((city, state), acc)| DelayCorrelation {
            seller_city: city,
            seller_state: state,
            total: acc.total,
            late_orders: acc.late,
            avg_weight_per_order: (acc.weight_n > 0)
                .then(|| round2(acc.weight_sum / f64::from(acc.weight_n))),
            delay_rate: delay_rate(acc.late, acc.total),
        })
        .collect();

    // DESC puts NULLs first in Postgres
    out.sort_by(|a, b| match (a.avg_weight_per_order, b.avg_weight_per_order) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(x), Some(y)) => y.total_cmp(&x),
    });
    out
}

#[async_trait]
impl AnalyticsSource for InMemoryAnalytics {
    async fn rating_summary(&self) -> AppResult<Vec<RatingSummary>> {
        self.check()?;
        Ok(rating_summary(&self.reviews))
    }

    async fn delay_correlation(&self) -> AppResult<Vec<DelayCorrelation>> {
        self.check()?;
        Ok(delay_correlation(&self.items))
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}
