// src/routes/mod.rs

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub mod correlation;
pub mod health;
pub mod rating;

pub fn router(state: AppState) -> Router {
    // Dashboard is served from anywhere during analysis sessions
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/rating", get(rating::get_rating))
        .route("/api/corel", get(correlation::get_correlation))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        analytics::AnalyticsSource,
        error::{AppError, AppResult},
        models::{DelayCorrelation, DeliveryStatus, RatingSummary},
    };

    /// Hands back canned rows, or fails every call with the given text.
    #[derive(Default)]
    struct Canned {
        rating: Vec<RatingSummary>,
        correlation: Vec<DelayCorrelation>,
        fail: Option<&'static str>,
    }

    #[async_trait]
    impl AnalyticsSource for Canned {
        async fn rating_summary(&self) -> AppResult<Vec<RatingSummary>> {
            match self.fail {
                Some(msg) => Err(AppError::query(msg)),
                None => Ok(self.rating.clone()),
            }
        }

        async fn delay_correlation(&self) -> AppResult<Vec<DelayCorrelation>> {
            match self.fail {
                Some(msg) => Err(AppError::query(msg)),
                None => Ok(self.correlation.clone()),
            }
        }

        async fn ping(&self) -> AppResult<()> {
            match self.fail {
                Some(msg) => Err(AppError::query(msg)),
                None => Ok(()),
            }
        }
    }

    async fn call(src: Canned, uri: &str) -> (StatusCode, Value) {
        let app = router(AppState { analytics: Arc::new(src) });
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn rating_returns_row_unmodified() {
        let src = Canned {
            rating: vec![RatingSummary {
                delivery_status: DeliveryStatus::OnTime,
                avg_review_score: 4.8,
                total_orders: 150,
            }],
            ..Default::default()
        };

        let (status, body) = call(src, "/api/rating").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"delivery_status": "On Time", "avg_review_score": 4.8, "total_orders": 150}])
        );
    }

    #[tokio::test]
    async fn empty_result_is_empty_array() {
        let (status, body) = call(Canned::default(), "/api/rating").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = call(Canned::default(), "/api/corel").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn query_failure_is_500_with_original_text() {
        let src = Canned { fail: Some("Connection Lost"), ..Default::default() };
        let (status, body) = call(src, "/api/rating").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("Connection Lost"));
        assert_eq!(detail, "Error Connection Lost");

        let src = Canned { fail: Some("Connection Lost"), ..Default::default() };
        let (status, body) = call(src, "/api/corel").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("Connection Lost"));
    }

    #[tokio::test]
    async fn correlation_uses_contract_field_names() {
        let src = Canned {
            correlation: vec![DelayCorrelation {
                seller_city: Some("sombrio".into()),
                seller_state: Some("SC".into()),
                total: 50,
                late_orders: 12,
                avg_weight_per_order: Some(22031.25),
                delay_rate: 24.0,
            }],
            ..Default::default()
        };

        let (status, body) = call(src, "/api/corel").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "seller_city": "sombrio",
                "seller_state": "SC",
                "total": 50,
                "late_orders": 12,
                "avg_weight_per_order": 22031.25,
                "Delay_Rate": 24.0
            }])
        );
    }

    #[tokio::test]
    async fn health_reports_database_state() {
        let (status, body) = call(Canned::default(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "version": "v1", "database": "up"}));

        let src = Canned { fail: Some("refused"), ..Default::default() };
        let (status, body) = call(src, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "down");
    }

    #[tokio::test]
    async fn service_without_engine_still_answers() {
        let app = router(AppState::postgres(None));
        let req = Request::builder().uri("/api/corel").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
