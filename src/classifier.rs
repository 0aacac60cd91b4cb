//! Threshold Classifier.
//!
//! The single place where readings are checked against the
//! [`ThresholdTable`]. Aggregation, chart highlighting and the readings
//! endpoint all go through [`Classifier`] so that no call site carries its
//! own copy of the limits.

use crate::error::HealthError;
use crate::models::{ClassifiedReading, Reading};
use crate::thresholds::{Parameter, ThresholdTable};

/// Per-parameter violation flags for one reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Violations {
    flags: [bool; 5],
}

impl Violations {
    // ---
    pub fn any(&self) -> bool {
        self.flags.iter().any(|f| *f)
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.flags[parameter.index()]
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Violated parameters in display order.
    pub fn iter(&self) -> impl Iterator<Item = Parameter> + '_ {
        Parameter::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Classifier {
    table: ThresholdTable,
}

impl Classifier {
    // ---
    pub fn new(table: ThresholdTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// Check every parameter of `reading` against its bound.
    ///
    /// Returns [`HealthError::InvalidReading`] for the first non-finite
    /// measurement, in display order.
    pub fn violations(&self, reading: &Reading) -> Result<Violations, HealthError> {
        // ---
        let mut out = Violations::default();
        for parameter in Parameter::ALL {
            let value = reading.measurements.get(parameter);
            if !value.is_finite() {
                return Err(HealthError::InvalidReading {
                    device_id: reading.device_id.clone(),
                    timestamp: reading.timestamp,
                    parameter,
                    value,
                });
            }
            out.flags[parameter.index()] = self.table.violates(parameter, value);
        }
        Ok(out)
    }

    /// `true` when at least one parameter is out of bounds.
    pub fn classify(&self, reading: &Reading) -> Result<bool, HealthError> {
        Ok(self.violations(reading)?.any())
    }

    pub fn classify_reading(&self, reading: &Reading) -> Result<ClassifiedReading, HealthError> {
        // ---
        let violations = self.violations(reading)?;
        Ok(ClassifiedReading {
            device_id: reading.device_id.clone(),
            timestamp: reading.timestamp,
            measurements: reading.measurements,
            is_abnormal: violations.any(),
            violations: violations.iter().collect(),
        })
    }

    pub fn classify_all(&self, readings: &[Reading]) -> Result<Vec<ClassifiedReading>, HealthError> {
        readings.iter().map(|r| self.classify_reading(r)).collect()
    }
}
