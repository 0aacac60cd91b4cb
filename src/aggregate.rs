//! Health Aggregator.
//!
//! Turns a selection of readings for one device into health percentages.
//! A single pass over the input; every abnormality decision is delegated
//! to the [`Classifier`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::Classifier;
use crate::error::HealthError;
use crate::models::Reading;
use crate::thresholds::Parameter;

/// Health percentages over one selection window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    // ---
    pub total_readings: usize,
    pub abnormal_readings: usize,
    /// `100 × (1 − abnormal / total)`.
    pub overall_pct: f64,
    /// Same ratio per parameter, each counted independently.
    pub per_parameter_pct: BTreeMap<Parameter, f64>,
}

impl HealthReport {
    pub fn parameter_pct(&self, parameter: Parameter) -> f64 {
        // Every parameter is populated by `aggregate`.
        self.per_parameter_pct.get(&parameter).copied().unwrap_or(100.0)
    }
}

/// Compute the health report for a non-empty selection.
///
/// Fails with [`HealthError::EmptySelection`] on empty input and with
/// [`HealthError::InvalidReading`] if any reading has a non-finite value.
pub fn aggregate(classifier: &Classifier, readings: &[Reading]) -> Result<HealthReport, HealthError> {
    // ---
    if readings.is_empty() {
        return Err(HealthError::EmptySelection);
    }

    let mut abnormal = 0usize;
    let mut violating = [0usize; 5];

    for reading in readings {
        let violations = classifier.violations(reading)?;
        if violations.any() {
            abnormal += 1;
        }
        for parameter in violations.iter() {
            violating[parameter.index()] += 1;
        }
    }

    let total = readings.len();
    let per_parameter_pct = Parameter::ALL
        .iter()
        .map(|p| (*p, health_pct(violating[p.index()], total)))
        .collect();

    let report = HealthReport {
        total_readings: total,
        abnormal_readings: abnormal,
        overall_pct: health_pct(abnormal, total),
        per_parameter_pct,
    };

    tracing::debug!(
        total = report.total_readings,
        abnormal = report.abnormal_readings,
        overall_pct = report.overall_pct,
        "Aggregated health report"
    );

    Ok(report)
}

/// `100 - 100 * bad / total`, computed so both ends are exact.
fn health_pct(bad: usize, total: usize) -> f64 {
    // ---
    if bad == 0 {
        return 100.0;
    }
    if bad >= total {
        return 0.0;
    }
    (100.0 - (bad as f64) * 100.0 / (total as f64)).clamp(0.0, 100.0)
}

/// Colour band of a health progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    /// Below 35%.
    Critical,
    /// 35% up to (not including) 50%.
    Warning,
    Good,
}

impl HealthBand {
    pub fn from_pct(pct: f64) -> Self {
        // ---
        if pct < 35.0 {
            HealthBand::Critical
        } else if pct < 50.0 {
            HealthBand::Warning
        } else {
            HealthBand::Good
        }
    }

    pub fn color(self) -> &'static str {
        // ---
        match self {
            HealthBand::Critical => "red",
            HealthBand::Warning => "yellow",
            HealthBand::Good => "blue",
        }
    }
}
