//! Device health core for the `codemetal-devicehealth` service.
//!
//! Telemetry readings from a fleet of mock medical devices are checked
//! against a fixed Threshold Table by the [`Classifier`], and selections of
//! one device over a date range are turned into health percentages by
//! [`aggregate()`]. The HTTP layer in [`routes`] serves both to the
//! dashboard.
//!
//! Module boundaries follow the Explicit Module Boundary Pattern (EMBP):
//! sibling modules reach each other through the re-exports below rather
//! than through each other's internals.

pub mod aggregate;
pub mod chart;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod models;
pub mod routes;
pub mod thresholds;

pub use aggregate::{aggregate, HealthBand, HealthReport};
pub use classifier::{Classifier, Violations};
pub use config::Config;
pub use dataset::{Dataset, Selection};
pub use error::HealthError;
pub use models::{ClassifiedReading, Measurements, Reading};
pub use thresholds::{Bound, Parameter, ThresholdTable, VibrationRule};
