// Route table for the dashboard API
use crate::application::data_loader::{DETAILS_PATH, OVERVIEW_PATH, TIMESERIES_PATH};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{details, health_check, overview, timeseries};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub const HEALTH_PATH: &str = "/api/healthz";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(OVERVIEW_PATH, get(overview))
        .route(TIMESERIES_PATH, get(timeseries))
        .route(DETAILS_PATH, get(details))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
