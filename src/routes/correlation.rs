// src/routes/correlation.rs

use axum::{extract::State, Json};
use tracing::error;

use crate::{error::AppResult, models::DelayCorrelation, AppState};

/// GET /api/corel
pub async fn get_correlation(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DelayCorrelation>>> {
    let rows = state
        .analytics
        .delay_correlation()
        .await
        .inspect_err(|e| error!(error = %e, "delay correlation query failed"))?;
    Ok(Json(rows))
}
