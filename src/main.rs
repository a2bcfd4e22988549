// Main entry point - configuration, API server and optional headless self-check
use std::{net::SocketAddr, sync::Arc};

use analytics_dashboard::application::dashboard_controller::DashboardController;
use analytics_dashboard::application::dashboard_service::DashboardService;
use analytics_dashboard::application::data_loader::DataLoader;
use analytics_dashboard::application::ui_binding::ids;
use analytics_dashboard::infrastructure::config::load_config;
use analytics_dashboard::infrastructure::headless_charts::HeadlessCharts;
use analytics_dashboard::infrastructure::http_transport::HttpTransport;
use analytics_dashboard::infrastructure::memory_document::MemoryDocument;
use analytics_dashboard::presentation::app_state::AppState;
use analytics_dashboard::presentation::router::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;

    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(config.server.timeseries_rounds),
    });

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "starting analytics dashboard API");

    let server = tokio::spawn(async move { axum::serve(listener, router(state)).await });

    if config.dashboard.self_check {
        self_check(&config.api_base_url()).await;
    }

    server.await??;
    Ok(())
}

/// Drive one full dashboard cycle against the API and log what got rendered.
async fn self_check(base_url: &str) {
    let loader = DataLoader::new(Arc::new(HttpTransport::new(base_url)));
    let mut dashboard = DashboardController::new(MemoryDocument::standard_layout(), HeadlessCharts::new(), loader);

    match dashboard.start().await {
        Ok(()) => tracing::info!(
            base_url,
            charts = dashboard.charts().len(),
            detail_rows = dashboard.ui().rows(ids::DETAILS_TABLE_BODY).len(),
            "self-check passed"
        ),
        Err(e) => tracing::warn!(base_url, error = %e, "self-check failed"),
    }

    let removed = dashboard.settle_toasts().await;
    tracing::debug!(removed, "self-check toasts cleared");

    dashboard.destroy();
}
