// src/client/report.rs

use std::fmt::{self, Write};

use super::{
    insights::{self, PARTNER_REVIEW_DELAY_RATE},
    ApiStatus, Dashboard,
};
use crate::models::DelayCorrelation;

const TITLE: &str = "Logistics and Customer Satisfaction Analysis: Brazilian E-Commerce";

pub fn render_report(dash: &Dashboard, status: ApiStatus) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, dash, status)?;
    Ok(out)
}

/// City name and normalized state code, with placeholders for NULLs.
fn place(r: &DelayCorrelation) -> (&str, String) {
    let city = r.seller_city.as_deref().unwrap_or("(unknown city)");
    let state = r
        .seller_state
        .as_deref()
        .map(insights::normalize_state)
        .unwrap_or_else(|| "??".into());
    (city, state)
}

fn write_report(out: &mut String, dash: &Dashboard, status: ApiStatus) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "Status: {}", status.label())?;
    writeln!(out)?;

    writeln!(out, "1. Impact of delays on customer experience")?;
    if dash.rating.is_empty() {
        writeln!(out, "   No rating data available. Please ensure the database is populated.")?;
    } else {
        for r in &dash.rating {
            writeln!(
                out,
                "   {:<14} avg rating {:.2} over {} orders",
                r.delivery_status.as_str(),
                r.avg_review_score,
                r.total_orders
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "2. Correlation between product weight and logistics speed")?;
    if dash.correlation.is_empty() {
        writeln!(out, "   No delivery data available.")?;
    } else {
        writeln!(out, "   {} seller cities with more than 10 delivered items", dash.correlation.len())?;
        match insights::trendline(&dash.correlation) {
            Some(t) => writeln!(
                out,
                "   Trend: {:+.4} pp delay rate per kg ({:.0} g to {:.0} g)",
                t.slope * 1000.0,
                t.x_min,
                t.x_max
            )?,
            None => writeln!(out, "   Not enough distinct weights for a trendline")?,
        }
        for r in dash.correlation.iter().take(5) {
            let weight = r
                .avg_weight_per_order
                .map(|w| format!("{w:.0} g"))
                .unwrap_or_else(|| "n/a".into());
            let (city, state) = place(r);
            writeln!(
                out,
                "   {:<24} {:<2} {:>10}  delay {:>6.2}%",
                city,
                state,
                weight,
                r.delay_rate
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "3. Geographical anomalies")?;
    if dash.correlation.is_empty() {
        writeln!(out, "   No geographical data available.")?;
    } else {
        if let Some(max) = insights::max_delay_rate(&dash.correlation) {
            writeln!(out, "   Delay rate scale: 0% to {max:.2}%")?;
        }
        let flagged = insights::partner_review_candidates(&dash.correlation);
        if flagged.is_empty() {
            writeln!(out, "   No city exceeds {PARTNER_REVIEW_DELAY_RATE}% delay rate")?;
        } else {
            writeln!(out, "   Review logistics partners in (delay rate > {PARTNER_REVIEW_DELAY_RATE}%):")?;
            for r in flagged {
                let (city, state) = place(r);
                writeln!(out, "   - {city} ({state}): {:.2}%", r.delay_rate)?;
            }
        }
    }
    Ok(())
}
