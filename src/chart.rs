//! Chart series for the dashboard's per-parameter line charts.
//!
//! Abnormal markers come from the [`Classifier`], never from a local copy of
//! the limits.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classifier::Classifier;
use crate::error::HealthError;
use crate::models::Reading;
use crate::thresholds::Parameter;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    // ---
    pub parameter: Parameter,
    pub title: String,
    pub unit: String,
    /// `[min, max]` of the y axis.
    pub y_range: [f64; 2],
    pub points: Vec<ChartPoint>,
    /// Readings flagged abnormal on any parameter, plotted on this axis.
    pub abnormal_points: Vec<ChartPoint>,
    pub warning: Option<String>,
}

/// Build the line series for one parameter.
///
/// The y range starts at the parameter's default and widens to fit every
/// abnormal point.
pub fn chart_series(
    classifier: &Classifier,
    readings: &[Reading],
    parameter: Parameter,
) -> Result<ChartSeries, HealthError> {
    // ---
    let (mut y_min, mut y_max) = parameter.chart_range();
    let mut points = Vec::with_capacity(readings.len());
    let mut abnormal_points = Vec::new();

    for reading in readings {
        let point = ChartPoint {
            timestamp: reading.timestamp,
            value: reading.measurements.get(parameter),
        };
        if classifier.classify(reading)? {
            y_min = y_min.min(point.value);
            y_max = y_max.max(point.value);
            abnormal_points.push(point);
        }
        points.push(point);
    }

    let warning = (!abnormal_points.is_empty())
        .then(|| format!("Detected abnormal points in {}.", parameter.title()));

    Ok(ChartSeries {
        parameter,
        title: parameter.title().to_string(),
        unit: parameter.unit().to_string(),
        y_range: [y_min, y_max],
        points,
        abnormal_points,
        warning,
    })
}

/// All five series in display order.
pub fn dashboard_charts(classifier: &Classifier, readings: &[Reading]) -> Result<Vec<ChartSeries>, HealthError> {
    Parameter::ALL
        .iter()
        .map(|p| chart_series(classifier, readings, *p))
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::Measurements;
    use chrono::{Duration, TimeZone};

    /// `(voltage, vibration)` pairs, everything else nominal.
    fn readings(values: &[(f64, f64)]) -> Vec<Reading> {
        // ---
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, (voltage, vibration))| {
                Reading::new(
                    "MedDevice_004",
                    start + Duration::hours(i as i64),
                    Measurements {
                        voltage: *voltage,
                        current: 1.0,
                        temperature: 30.0,
                        humidity: 50.0,
                        vibration: *vibration,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_normal_series_keeps_default_range() {
        // ---
        let data = readings(&[(220.0, 0.1), (221.0, -0.2)]);
        let series = chart_series(&Classifier::default(), &data, Parameter::Voltage).unwrap();

        assert_eq!(series.points.len(), 2);
        assert!(series.abnormal_points.is_empty());
        assert_eq!(series.y_range, [100.0, 300.0]);
        assert_eq!(series.warning, None);
        assert_eq!(series.unit, "V");
    }

    #[test]
    fn test_abnormal_reading_marked_on_every_axis() {
        // ---
        // Voltage is out of bounds; vibration chart still highlights the reading.
        let data = readings(&[(220.0, 0.1), (245.0, 0.3)]);
        let series = chart_series(&Classifier::default(), &data, Parameter::Vibration).unwrap();

        assert_eq!(series.abnormal_points.len(), 1);
        assert_eq!(series.abnormal_points[0].value, 0.3);
        assert_eq!(
            series.warning.as_deref(),
            Some("Detected abnormal points in Vibration.")
        );
    }

    #[test]
    fn test_range_widens_to_abnormal_values() {
        // ---
        let data = readings(&[(220.0, 0.1), (240.0, 1.8)]);
        let series = chart_series(&Classifier::default(), &data, Parameter::Vibration).unwrap();
        assert_eq!(series.y_range, [-0.5, 1.8]);
    }

    #[test]
    fn test_dashboard_has_five_series_in_order() {
        // ---
        let data = readings(&[(220.0, 0.1)]);
        let charts = dashboard_charts(&Classifier::default(), &data).unwrap();
        let order: Vec<Parameter> = charts.iter().map(|c| c.parameter).collect();
        assert_eq!(order, Parameter::ALL.to_vec());
    }
}
