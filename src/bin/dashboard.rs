// src/bin/dashboard.rs
//
// Text rendition of the dashboard: fetches both datasets from `API_URL`.

use olist_analytics::{
    client::{report::render_report, DashboardClient},
    config, telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing("warn");

    let client = DashboardClient::new(config::api_base_url());
    let (status, dash) = tokio::join!(client.api_status(), client.load());

    print!("{}", render_report(&dash, status)?);
    Ok(())
}
