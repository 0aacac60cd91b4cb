//! Telemetry data model for the device health service.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HealthError;
use crate::thresholds::Parameter;

/// The five numeric measurements of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    // ---
    pub voltage: f64,
    pub current: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub vibration: f64,
}

impl Measurements {
    // ---
    pub fn get(&self, parameter: Parameter) -> f64 {
        // ---
        match parameter {
            Parameter::Voltage => self.voltage,
            Parameter::Current => self.current,
            Parameter::Temperature => self.temperature,
            Parameter::Humidity => self.humidity,
            Parameter::Vibration => self.vibration,
        }
    }

    /// Build measurements from `(parameter, value)` pairs in any order.
    ///
    /// A later pair for the same parameter replaces an earlier one. Fails if
    /// any of the five parameters is absent.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, HealthError>
    where
        I: IntoIterator<Item = (Parameter, f64)>,
    {
        // ---
        let mut slots: [Option<f64>; 5] = [None; 5];
        for (parameter, value) in pairs {
            slots[parameter.index()] = Some(value);
        }

        let take = |p: Parameter| slots[p.index()].ok_or(HealthError::MissingMeasurement(p));

        Ok(Measurements {
            voltage: take(Parameter::Voltage)?,
            current: take(Parameter::Current)?,
            temperature: take(Parameter::Temperature)?,
            humidity: take(Parameter::Humidity)?,
            vibration: take(Parameter::Vibration)?,
        })
    }
}

/// One timestamped telemetry sample for one device.
///
/// There is no `is_abnormal` field: abnormality is always
/// derived from the measurements by [`crate::classifier::Classifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    // ---
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl Reading {
    // ---
    pub fn new(device_id: impl Into<String>, timestamp: DateTime<Utc>, measurements: Measurements) -> Self {
        Reading {
            device_id: device_id.into(),
            timestamp,
            measurements,
        }
    }
}

/// A reading together with its classification, as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReading {
    // ---
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub measurements: Measurements,
    pub is_abnormal: bool,
    pub violations: Vec<Parameter>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_get_returns_matching_field() {
        // ---
        let m = Measurements {
            voltage: 220.0,
            current: 1.5,
            temperature: 30.0,
            humidity: 40.0,
            vibration: 0.2,
        };

        assert_eq!(m.get(Parameter::Voltage), 220.0);
        assert_eq!(m.get(Parameter::Current), 1.5);
        assert_eq!(m.get(Parameter::Temperature), 30.0);
        assert_eq!(m.get(Parameter::Humidity), 40.0);
        assert_eq!(m.get(Parameter::Vibration), 0.2);
    }

    #[test]
    fn test_from_pairs_ignores_order() {
        // ---
        let forward = Measurements::from_pairs([
            (Parameter::Voltage, 225.0),
            (Parameter::Current, 1.0),
            (Parameter::Temperature, 30.0),
            (Parameter::Humidity, 50.0),
            (Parameter::Vibration, 0.1),
        ])
        .unwrap();

        let backward = Measurements::from_pairs([
            (Parameter::Vibration, 0.1),
            (Parameter::Humidity, 50.0),
            (Parameter::Temperature, 30.0),
            (Parameter::Current, 1.0),
            (Parameter::Voltage, 225.0),
        ])
        .unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_classification_ignores_field_order() {
        // ---
        use crate::classifier::Classifier;
        use chrono::TimeZone;

        let classifier = Classifier::default();
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

        for voltage in [235.0, 225.0] {
            let forward = Measurements::from_pairs([
                (Parameter::Voltage, voltage),
                (Parameter::Current, 1.0),
                (Parameter::Temperature, 30.0),
                (Parameter::Humidity, 50.0),
                (Parameter::Vibration, 0.1),
            ])
            .unwrap();
            let shuffled = Measurements::from_pairs([
                (Parameter::Humidity, 50.0),
                (Parameter::Vibration, 0.1),
                (Parameter::Voltage, voltage),
                (Parameter::Temperature, 30.0),
                (Parameter::Current, 1.0),
            ])
            .unwrap();

            let a = classifier.classify(&Reading::new("MedDevice_000", at, forward)).unwrap();
            let b = classifier.classify(&Reading::new("MedDevice_000", at, shuffled)).unwrap();
            assert_eq!(a, b);
            assert_eq!(a, voltage > 230.0);
        }
    }

    #[test]
    fn test_from_pairs_reports_missing_parameter() {
        // ---
        let err = Measurements::from_pairs([
            (Parameter::Voltage, 225.0),
            (Parameter::Current, 1.0),
            (Parameter::Temperature, 30.0),
            (Parameter::Vibration, 0.1),
        ])
        .unwrap_err();

        assert_eq!(err, HealthError::MissingMeasurement(Parameter::Humidity));
    }

    #[test]
    fn test_reading_serializes_flat() {
        // ---
        use chrono::TimeZone;

        let reading = Reading::new(
            "MedDevice_003",
            Utc.with_ymd_and_hms(2023, 1, 1, 6, 0, 0).unwrap(),
            Measurements {
                voltage: 220.0,
                current: 1.5,
                temperature: 30.0,
                humidity: 40.0,
                vibration: 0.2,
            },
        );

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["device_id"], "MedDevice_003");
        assert_eq!(json["voltage"], 220.0);
        assert!(json.get("is_abnormal").is_none());
    }
}
