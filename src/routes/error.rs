//! Mapping from [`HealthError`] to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::HealthError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Handler error: a domain error on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub HealthError);

impl From<HealthError> for ApiError {
    fn from(err: HealthError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        // ---
        match &self.0 {
            HealthError::UnknownDevice(_) => StatusCode::NOT_FOUND,
            HealthError::EmptySelection => StatusCode::UNPROCESSABLE_ENTITY,
            HealthError::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
            HealthError::InvalidReading { .. }
            | HealthError::MissingMeasurement(_)
            | HealthError::OutOfOrder { .. }
            | HealthError::DuplicateReading { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self.0);
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
