//! Threshold Table for device telemetry.
//!
//! One bound per measured parameter. A value that sits exactly on a bound is
//! never abnormal: every comparison here is strict.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// The five measurements every reading carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Voltage,
    Current,
    Temperature,
    Humidity,
    Vibration,
}

impl Parameter {
    /// All parameters in dashboard display order.
    pub const ALL: [Parameter; 5] = [
        Parameter::Voltage,
        Parameter::Current,
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::Vibration,
    ];

    pub fn index(self) -> usize {
        // ---
        match self {
            Parameter::Voltage => 0,
            Parameter::Current => 1,
            Parameter::Temperature => 2,
            Parameter::Humidity => 3,
            Parameter::Vibration => 4,
        }
    }

    pub fn name(self) -> &'static str {
        // ---
        match self {
            Parameter::Voltage => "voltage",
            Parameter::Current => "current",
            Parameter::Temperature => "temperature",
            Parameter::Humidity => "humidity",
            Parameter::Vibration => "vibration",
        }
    }

    pub fn title(self) -> &'static str {
        // ---
        match self {
            Parameter::Voltage => "Voltage",
            Parameter::Current => "Current",
            Parameter::Temperature => "Temperature",
            Parameter::Humidity => "Humidity",
            Parameter::Vibration => "Vibration",
        }
    }

    pub fn unit(self) -> &'static str {
        // ---
        match self {
            Parameter::Voltage => "V",
            Parameter::Current => "A",
            Parameter::Temperature => "°C",
            Parameter::Humidity => "%",
            Parameter::Vibration => "G",
        }
    }

    /// Default y-axis range used by the dashboard charts.
    pub fn chart_range(self) -> (f64, f64) {
        // ---
        match self {
            Parameter::Voltage => (100.0, 300.0),
            Parameter::Current => (0.0, 5.0),
            Parameter::Temperature => (10.0, 50.0),
            Parameter::Humidity => (0.0, 100.0),
            Parameter::Vibration => (-0.5, 0.5),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A one-sided or two-sided limit on a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bound {
    /// Abnormal when the value is strictly greater than the limit.
    Above { limit: f64 },
    /// Abnormal when the value is strictly outside `[min, max]`.
    Outside { min: f64, max: f64 },
}

impl Bound {
    pub fn violated_by(&self, value: f64) -> bool {
        // ---
        match *self {
            Bound::Above { limit } => value > limit,
            Bound::Outside { min, max } => value < min || value > max,
        }
    }
}

/// Which of the two observed vibration limits is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VibrationRule {
    /// Abnormal outside `[-0.5, 0.5]`.
    #[default]
    Band,
    /// Abnormal above `1.0`.
    Ceiling,
}

impl VibrationRule {
    pub fn bound(self) -> Bound {
        // ---
        match self {
            VibrationRule::Band => Bound::Outside { min: -0.5, max: 0.5 },
            VibrationRule::Ceiling => Bound::Above { limit: 1.0 },
        }
    }
}

impl FromStr for VibrationRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // ---
        match s.trim().to_ascii_lowercase().as_str() {
            "band" => Ok(VibrationRule::Band),
            "ceiling" => Ok(VibrationRule::Ceiling),
            other => Err(anyhow!(
                "unknown vibration rule '{}', expected 'band' or 'ceiling'",
                other
            )),
        }
    }
}

impl fmt::Display for VibrationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VibrationRule::Band => f.write_str("band"),
            VibrationRule::Ceiling => f.write_str("ceiling"),
        }
    }
}

/// Fixed mapping from parameter to bound, indexed by [`Parameter::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    bounds: [Bound; 5],
}

impl ThresholdTable {
    pub fn new(vibration: VibrationRule) -> Self {
        // ---
        Self {
            bounds: [
                Bound::Above { limit: 230.0 },
                Bound::Above { limit: 2.0 },
                Bound::Above { limit: 45.0 },
                Bound::Above { limit: 70.0 },
                vibration.bound(),
            ],
        }
    }

    pub fn bound(&self, parameter: Parameter) -> Bound {
        self.bounds[parameter.index()]
    }

    pub fn violates(&self, parameter: Parameter, value: f64) -> bool {
        self.bound(parameter).violated_by(value)
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::new(VibrationRule::default())
    }
}
