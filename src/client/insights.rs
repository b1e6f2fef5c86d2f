// src/client/insights.rs
//
// Views derived from the correlation dataset for the dashboard.

use crate::models::DelayCorrelation;

/// Cities above this delay rate are flagged for a logistics-partner review.
pub const PARTNER_REVIEW_DELAY_RATE: f64 = 15.0;

/// Least-squares line `Delay_Rate = slope * weight + intercept`, spanning
/// the observed weight range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Trendline {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// End points of the drawn segment.
    pub fn segment(&self) -> [(f64, f64); 2] {
        [(self.x_min, self.at(self.x_min)), (self.x_max, self.at(self.x_max))]
    }
}

/// `None` unless there are at least two rows with a weight and the weights
/// are not all identical.
pub fn trendline(rows: &[DelayCorrelation]) -> Option<Trendline> {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|r| r.avg_weight_per_order.map(|w| (w, r.delay_rate)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in &points {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    Some(Trendline { slope, intercept: mean_y - slope * mean_x, x_min, x_max })
}

pub fn normalize_state(state: &str) -> String {
    state.trim().to_uppercase()
}

/// Upper bound of the map's color scale.
pub fn max_delay_rate(rows: &[DelayCorrelation]) -> Option<f64> {
    rows.iter().map(|r| r.delay_rate).reduce(f64::max)
}

/// Highest delay rate first.
pub fn partner_review_candidates(rows: &[DelayCorrelation]) -> Vec<&DelayCorrelation> {
    let mut out: Vec<_> = rows
        .iter()
        .filter(|r| r.delay_rate > PARTNER_REVIEW_DELAY_RATE)
        .collect();
    out.sort_by(|a, b| b.delay_rate.total_cmp(&a.delay_rate));
    out
}
