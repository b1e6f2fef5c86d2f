// src/client/mod.rs

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{DelayCorrelation, RatingSummary};

pub mod insights;
pub mod report;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Connected,
    Issue,
    Offline,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Connected => "● API Connected",
            ApiStatus::Issue => "○ API Issue",
            ApiStatus::Offline => "○ API Offline",
        }
    }
}

/// Both datasets the dashboard renders; empty when a fetch failed.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub rating: Vec<RatingSummary>,
    pub correlation: Vec<DelayCorrelation>,
}

#[derive(Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn try_fetch<T: DeserializeOwned>(&self, path: &str) -> reqwest::Result<Vec<T>> {
        self.http
            .get(self.url(path))
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Any failure (transport, non-2xx, bad body) degrades to an empty dataset.
    pub async fn fetch_or_empty<T: DeserializeOwned>(&self, path: &str) -> Vec<T> {
        match self.try_fetch(path).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(path, error = %e, "fetch failed, using empty dataset");
                Vec::new()
            }
        }
    }

    pub async fn fetch_rating(&self) -> Vec<RatingSummary> {
        self.fetch_or_empty("api/rating").await
    }

    pub async fn fetch_correlation(&self) -> Vec<DelayCorrelation> {
        self.fetch_or_empty("api/corel").await
    }

    pub async fn load(&self) -> Dashboard {
        let (rating, correlation) = tokio::join!(self.fetch_rating(), self.fetch_correlation());
        Dashboard { rating, correlation }
    }

    pub async fn api_status(&self) -> ApiStatus {
        let res = self
            .http
            .get(self.url("api/rating"))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await;
        match res {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => ApiStatus::Connected,
            Ok(resp) => {
                debug!(status = %resp.status(), "API answered with non-200");
                ApiStatus::Issue
            }
            Err(_) => ApiStatus::Offline,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use tokio::net::TcpListener;

    use super::*;
    use crate::{
        analytics::{
            memory::{OrderDelivery, ReviewedOrder, ShippedItem},
            InMemoryAnalytics,
        },
        models::DeliveryStatus,
        routes, AppState,
    };

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 5, day).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn delivered(late: bool) -> OrderDelivery {
        OrderDelivery {
            order_status: "delivered".into(),
            delivered_at: Some(if late { ts(20) } else { ts(10) }),
            estimated_at: Some(ts(15)),
        }
    }

    fn sample() -> InMemoryAnalytics {
        let reviews = (0..4)
            .map(|i| ReviewedOrder { order: delivered(i == 3), review_score: if i == 3 { 2 } else { 5 } })
            .collect();
        let items = (0..12)
            .map(|i| ShippedItem {
                order: delivered(i < 3),
                seller_city: Some("sombrio".into()),
                seller_state: Some("sc".into()),
                product_weight_g: Some(22000.0),
            })
            .collect();
        InMemoryAnalytics::new(reviews, items)
    }

    async fn serve(src: InMemoryAnalytics) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = routes::router(AppState::new(src));
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// An address nothing listens on.
    async fn dead_address() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn loads_both_datasets() {
        let client = DashboardClient::new(serve(sample()).await);

        let dash = client.load().await;
        assert_eq!(dash.rating.len(), 2);
        assert_eq!(dash.rating[0].delivery_status, DeliveryStatus::OnTime);
        assert_eq!(dash.rating[0].avg_review_score, 5.0);
        assert_eq!(dash.correlation.len(), 1);
        assert_eq!(dash.correlation[0].delay_rate, 25.0);
        assert_eq!(client.api_status().await, ApiStatus::Connected);
    }

    #[tokio::test]
    async fn server_error_degrades_to_empty() {
        let client = DashboardClient::new(serve(InMemoryAnalytics::failing("Connection Lost")).await);

        assert!(client.fetch_rating().await.is_empty());
        assert!(client.fetch_correlation().await.is_empty());
        assert_eq!(client.api_status().await, ApiStatus::Issue);
    }

    #[tokio::test]
    async fn unreachable_api_is_offline() {
        let client = DashboardClient::new(dead_address().await);

        let dash = client.load().await;
        assert!(dash.rating.is_empty());
        assert!(dash.correlation.is_empty());
        assert_eq!(client.api_status().await, ApiStatus::Offline);
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = DashboardClient::new("http://localhost:8000/");
        assert_eq!(client.url("/api/rating"), "http://localhost:8000/api/rating");
        assert_eq!(client.url("api/corel"), "http://localhost:8000/api/corel");
    }
}
