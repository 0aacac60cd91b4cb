//! Domain error taxonomy for the device health core.
//!
//! Every failure of the classifier, aggregator and dataset layers is one of
//! these variants. They are returned to the immediate caller and never
//! swallowed; the HTTP layer decides how to surface them.

use chrono::{DateTime, NaiveDate, Utc};

use crate::thresholds::Parameter;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HealthError {
    /// A measurement is NaN or infinite; the classifier refuses it.
    #[error("Invalid reading from {device_id} at {timestamp}: {parameter} is {value}")]
    InvalidReading {
        device_id: String,
        timestamp: DateTime<Utc>,
        parameter: Parameter,
        value: f64,
    },

    /// The aggregator was handed zero readings.
    #[error("Selection contains no readings")]
    EmptySelection,

    #[error("Missing measurement: {0}")]
    MissingMeasurement(Parameter),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Readings for {device_id} go back in time at {timestamp}")]
    OutOfOrder {
        device_id: String,
        timestamp: DateTime<Utc>,
    },

    #[error("Duplicate reading for {device_id} at {timestamp}")]
    DuplicateReading {
        device_id: String,
        timestamp: DateTime<Utc>,
    },
}
