// src/routes/health.rs

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    let database = match state.analytics.ping().await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    Json(HealthResp { status: "ok", version: "v1", database })
}
