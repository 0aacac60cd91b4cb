// src/routes/health.rs
//! Liveness endpoint for the device health service.
//!
//! `GET /health` tells orchestrators and CI that the process is up and that
//! a dataset was loaded. It is a sibling module in the `routes` directory and
//! only exports a subrouter to the gateway (`mod.rs`).

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    devices: usize,
    readings: usize,
}

/// Handle `GET /health`.
///
/// Only reports sizes of the in-memory dataset; no classification runs here.
async fn health(State((dataset, _)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        devices: dataset.device_ids().len(),
        readings: dataset.len(),
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
