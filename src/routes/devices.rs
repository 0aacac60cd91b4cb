//! Per-device dashboard endpoints.
//!
//! - `GET /devices`
//! - `GET /devices/{device_id}/health`
//! - `GET /devices/{device_id}/readings`
//! - `GET /devices/{device_id}/charts`
//!
//! The last three accept optional `start` / `end` dates (`YYYY-MM-DD`,
//! inclusive) and default to the dataset's full span.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ApiError, AppState};
use crate::aggregate::{aggregate, HealthBand, HealthReport};
use crate::chart::{dashboard_charts, ChartSeries};
use crate::{ClassifiedReading, Dataset, HealthError, Parameter, Selection};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/devices", get(list_devices))
        .route("/devices/{device_id}/health", get(device_health))
        .route("/devices/{device_id}/readings", get(device_readings))
        .route("/devices/{device_id}/charts", get(device_charts))
}

/// Query parameters for the selection window.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Resolve the request into a [`Selection`], filling gaps from the dataset span.
fn selection_for(dataset: &Dataset, device_id: String, window: &WindowQuery) -> Result<Selection, HealthError> {
    // ---
    if !dataset.contains_device(&device_id) {
        return Err(HealthError::UnknownDevice(device_id));
    }
    let (first, last) = dataset
        .date_span()
        .ok_or_else(|| HealthError::UnknownDevice(device_id.clone()))?;

    Selection::new(device_id, window.start.unwrap_or(first), window.end.unwrap_or(last))
}

// ---

#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceList {
    pub devices: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

async fn list_devices(State((dataset, _)): State<AppState>) -> Json<DeviceList> {
    // ---
    let span = dataset.date_span();
    Json(DeviceList {
        devices: dataset.device_ids().to_vec(),
        first_date: span.map(|(a, _)| a),
        last_date: span.map(|(_, b)| b),
    })
}

// ---

/// One progress indicator on the dashboard.
#[derive(Debug, Serialize)]
pub struct Indicator {
    pub label: String,
    pub pct: f64,
    pub band: HealthBand,
    pub color: &'static str,
}

impl Indicator {
    fn new(label: impl Into<String>, pct: f64) -> Self {
        // ---
        let band = HealthBand::from_pct(pct);
        Indicator {
            label: label.into(),
            pct,
            band,
            color: band.color(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceHealth {
    pub selection: Selection,
    pub report: HealthReport,
    pub overall: Indicator,
    pub parameters: Vec<Indicator>,
}

async fn device_health(
    Path(device_id): Path<String>,
    Query(window): Query<WindowQuery>,
    State((dataset, classifier)): State<AppState>,
) -> Result<Json<DeviceHealth>, ApiError> {
    // ---
    info!("GET /devices/{}/health {:?}", device_id, window);

    let selection = selection_for(&dataset, device_id, &window)?;
    let readings = dataset.select(&selection)?;
    let report = aggregate(&classifier, &readings)?;

    let overall = Indicator::new("Overall Health Percentage", report.overall_pct);
    let parameters = Parameter::ALL
        .iter()
        .map(|p| Indicator::new(format!("{} Health", p.title()), report.parameter_pct(*p)))
        .collect();

    debug!(
        "{}: overall {:.2}% over {} readings",
        selection.device_id, report.overall_pct, report.total_readings
    );

    Ok(Json(DeviceHealth {
        selection,
        report,
        overall,
        parameters,
    }))
}

// ---

async fn device_readings(
    Path(device_id): Path<String>,
    Query(window): Query<WindowQuery>,
    State((dataset, classifier)): State<AppState>,
) -> Result<Json<Vec<ClassifiedReading>>, ApiError> {
    // ---
    info!("GET /devices/{}/readings {:?}", device_id, window);

    let selection = selection_for(&dataset, device_id, &window)?;
    let readings = dataset.select(&selection)?;
    let classified = classifier.classify_all(&readings)?;

    debug!("Returning {} classified readings", classified.len());
    Ok(Json(classified))
}

// ---

async fn device_charts(
    Path(device_id): Path<String>,
    Query(window): Query<WindowQuery>,
    State((dataset, classifier)): State<AppState>,
) -> Result<Json<Vec<ChartSeries>>, ApiError> {
    // ---
    info!("GET /devices/{}/charts {:?}", device_id, window);

    let selection = selection_for(&dataset, device_id, &window)?;
    let readings = dataset.select(&selection)?;
    let charts = dashboard_charts(&classifier, &readings)?;

    Ok(Json(charts))
}
