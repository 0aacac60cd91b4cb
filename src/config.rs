//! Configuration loader for the `codemetal-devicehealth` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate calls `env::var` for
//! configuration.
//!
use std::env;

use anyhow::{anyhow, Result};

use crate::generator::GeneratorConfig;
use crate::thresholds::VibrationRule;

/// Parse an optional environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional environment variable that has no default.
macro_rules! parse_env_opt {
    ($var_name:expr, $ty:ty) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// TCP port the HTTP server binds on `0.0.0.0`.
    pub port: u16,

    /// Number of mock devices in the synthetic fleet.
    pub device_count: usize,

    /// Samples generated per device.
    pub samples_per_device: usize,

    /// Hours between consecutive samples of one device.
    pub sample_interval_hours: i64,

    /// Fixed RNG seed; `None` gives a fresh dataset on every start.
    pub dataset_seed: Option<u64>,

    /// Which vibration limit the classifier enforces.
    pub vibration_rule: VibrationRule,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Config {
            port: 8080,
            device_count: 10,
            samples_per_device: 120,
            sample_interval_hours: 6,
            dataset_seed: None,
            vibration_rule: VibrationRule::Band,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DASHBOARD_PORT` – HTTP port (default: 8080)
/// - `DEVICE_COUNT` – devices in the fleet (default: 10)
/// - `SAMPLES_PER_DEVICE` – samples per device (default: 120)
/// - `SAMPLE_INTERVAL_HOURS` – sampling interval (default: 6)
/// - `DATASET_SEED` – RNG seed (default: random)
/// - `VIBRATION_RULE` – `band` or `ceiling` (default: `band`)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let port = parse_env!("DASHBOARD_PORT", u16, defaults.port);
    let device_count = parse_env!("DEVICE_COUNT", usize, defaults.device_count);
    let samples_per_device = parse_env!("SAMPLES_PER_DEVICE", usize, defaults.samples_per_device);
    let sample_interval_hours = parse_env!("SAMPLE_INTERVAL_HOURS", i64, defaults.sample_interval_hours);
    let dataset_seed = parse_env_opt!("DATASET_SEED", u64);
    let vibration_rule = parse_env!("VIBRATION_RULE", VibrationRule, defaults.vibration_rule);

    let cfg = Config {
        port,
        device_count,
        samples_per_device,
        sample_interval_hours,
        dataset_seed,
        vibration_rule,
    };
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        // ---
        if self.device_count == 0 {
            return Err(anyhow!("DEVICE_COUNT must be at least 1"));
        }
        if self.samples_per_device == 0 {
            return Err(anyhow!("SAMPLES_PER_DEVICE must be at least 1"));
        }
        if self.sample_interval_hours <= 0 {
            return Err(anyhow!("SAMPLE_INTERVAL_HOURS must be positive"));
        }
        Ok(())
    }

    /// Generator settings derived from this configuration.
    pub fn generator(&self) -> GeneratorConfig {
        // ---
        GeneratorConfig {
            device_count: self.device_count,
            samples_per_device: self.samples_per_device,
            interval_hours: self.sample_interval_hours,
            seed: self.dataset_seed,
            ..GeneratorConfig::default()
        }
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        let seed = self
            .dataset_seed
            .map_or_else(|| "random".to_string(), |s| s.to_string());

        tracing::info!("Configuration loaded:");
        tracing::info!("  DASHBOARD_PORT        : {}", self.port);
        tracing::info!("  DEVICE_COUNT          : {}", self.device_count);
        tracing::info!("  SAMPLES_PER_DEVICE    : {}", self.samples_per_device);
        tracing::info!("  SAMPLE_INTERVAL_HOURS : {}", self.sample_interval_hours);
        tracing::info!("  DATASET_SEED          : {}", seed);
        tracing::info!("  VIBRATION_RULE        : {}", self.vibration_rule);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        // ---
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.vibration_rule, VibrationRule::Band);
    }

    #[test]
    fn test_zero_devices_rejected() {
        // ---
        let cfg = Config {
            device_count: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        // ---
        let cfg = Config {
            sample_interval_hours: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_generator_settings_follow_config() {
        // ---
        let cfg = Config {
            device_count: 4,
            samples_per_device: 24,
            sample_interval_hours: 1,
            dataset_seed: Some(9),
            ..Config::default()
        };
        let generator = cfg.generator();
        assert_eq!(generator.device_count, 4);
        assert_eq!(generator.samples_per_device, 24);
        assert_eq!(generator.interval_hours, 1);
        assert_eq!(generator.seed, Some(9));
        assert_eq!(generator.degraded_device.as_deref(), Some("MedDevice_001"));
    }
}
