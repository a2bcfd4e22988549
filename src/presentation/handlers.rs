// HTTP request handlers
use crate::domain::payload::{DetailsPayload, OverviewPayload, TimeseriesPayload};
use crate::presentation::app_state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

pub async fn overview(State(state): State<Arc<AppState>>) -> Json<OverviewPayload> {
    Json(state.dashboard_service.overview())
}

pub async fn timeseries(State(state): State<Arc<AppState>>) -> Json<TimeseriesPayload> {
    Json(state.dashboard_service.timeseries())
}

pub async fn details(State(state): State<Arc<AppState>>) -> Json<DetailsPayload> {
    Json(state.dashboard_service.details())
}
