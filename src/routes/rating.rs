// src/routes/rating.rs

use axum::{extract::State, Json};
use tracing::error;

use crate::{error::AppResult, models::RatingSummary, AppState};

/// GET /api/rating
pub async fn get_rating(State(state): State<AppState>) -> AppResult<Json<Vec<RatingSummary>>> {
    let rows = state
        .analytics
        .rating_summary()
        .await
        .inspect_err(|e| error!(error = %e, "rating summary query failed"))?;
    Ok(Json(rows))
}
