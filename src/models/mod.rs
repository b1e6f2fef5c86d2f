// src/models/mod.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

// ───────────────────────────────────────
// Rating vs. delivery punctuality
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "On Time")]
    OnTime,
    #[serde(rename = "Late Delivery")]
    LateDelivery,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::OnTime => "On Time",
            DeliveryStatus::LateDelivery => "Late Delivery",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown delivery status '{0}'")]
pub struct UnknownDeliveryStatus(pub String);

impl TryFrom<String> for DeliveryStatus {
    type Error = UnknownDeliveryStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "On Time" => Ok(DeliveryStatus::OnTime),
            "Late Delivery" => Ok(DeliveryStatus::LateDelivery),
            _ => Err(UnknownDeliveryStatus(s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RatingSummary {
    #[sqlx(try_from = "String")]
    pub delivery_status: DeliveryStatus,
    pub avg_review_score: f64,
    pub total_orders: i64,
}

// ───────────────────────────────────────
// Weight vs. delay, per seller city
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DelayCorrelation {
    pub seller_city: Option<String>, // nullable in the warehouse
    pub seller_state: Option<String>,
    pub total: i64,
    pub late_orders: i64,
    pub avg_weight_per_order: Option<f64>, // null when no product has a weight
    #[sqlx(rename = "Delay_Rate")]
    #[serde(rename = "Delay_Rate")]
    pub delay_rate: f64,
}

/// Percentage of late orders, rounded to two decimals. `0.0` for an empty group.
pub fn delay_rate(late_orders: i64, total: i64) -> f64 {
    ratio_round2(late_orders * 100, total)
}

/// `num / den` rounded to two decimals, half away from zero, computed on
/// integers so ties round the way Postgres `ROUND(numeric, 2)` does.
/// `0.0` when `den` is zero.
pub fn ratio_round2(num: i64, den: i64) -> f64 {
    if den == 0 {
        return 0.0;
    }
    let (num, den) = (i128::from(num), i128::from(den));
    let negative = (num < 0) != (den < 0);
    let (num, den) = (num.abs(), den.abs());
    let hundredths = (num * 200 + den) / (2 * den);
    let signed = if negative { -hundredths } else { hundredths };
    signed as f64 / 100.0
}

/// Two-decimal rounding of an already-inexact float (averaged weights).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
