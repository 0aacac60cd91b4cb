//! Synthetic telemetry source for the mock device fleet.
//!
//! Produces one reading per device per sampling interval over a fixed
//! window, with baseline noise, a number of injected abnormal runs, and one
//! deliberately degraded device. The output is ordered by device, then by
//! timestamp, with no duplicate `(device_id, timestamp)` pairs.

use std::f64::consts::PI;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Measurements, Reading};

/// Knobs for the synthetic fleet.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    // ---
    pub device_count: usize,
    pub samples_per_device: usize,
    pub interval_hours: i64,
    pub start: DateTime<Utc>,
    /// Number of abnormal runs injected at random fleet positions.
    pub pattern_count: usize,
    pub pattern_length: usize,
    /// Device whose first half of samples is overwritten with abnormal values.
    pub degraded_device: Option<String>,
    /// `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        // ---
        GeneratorConfig {
            device_count: 10,
            samples_per_device: 120,
            interval_hours: 6,
            start: fleet_epoch(),
            pattern_count: 5,
            pattern_length: 10,
            degraded_device: Some(device_name(1)),
            seed: None,
        }
    }
}

/// 2023-01-01T00:00:00Z
fn fleet_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(1_672_531_200)
}

pub fn device_name(index: usize) -> String {
    format!("MedDevice_{:03}", index)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    // ---
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    (0..n).map(move |i| start + step * i as f64)
}

/// Overwrite `slice` with the abnormal ramp used for injected faults.
fn inject_ramp(slice: &mut [Measurements]) {
    // ---
    let n = slice.len();
    let ramps = linspace(240.0, 250.0, n)
        .zip(linspace(2.5, 3.0, n))
        .zip(linspace(50.0, 60.0, n))
        .zip(linspace(80.0, 90.0, n))
        .zip(linspace(1.5, 2.0, n));

    for (m, ((((v, c), t), h), vib)) in slice.iter_mut().zip(ramps) {
        *m = Measurements {
            voltage: v,
            current: c,
            temperature: t,
            humidity: h,
            vibration: vib,
        };
    }
}

/// Generate the full fleet of readings.
pub fn generate(config: &GeneratorConfig) -> Vec<Reading> {
    // ---
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let total = config.device_count * config.samples_per_device;
    let phase: Vec<f64> = linspace(0.0, 20.0 * PI, total).collect();

    let mut values: Vec<Measurements> = phase
        .iter()
        .map(|x| Measurements {
            voltage: rng.gen_range(210.0..230.0),
            current: rng.gen_range(0.1..2.0),
            temperature: rng.gen_range(22.0..45.0),
            humidity: rng.gen_range(30.0..70.0),
            vibration: 0.5 * x.sin() + rng.gen_range(-0.05..0.05),
        })
        .collect();

    if config.pattern_length > 0 && total > config.pattern_length {
        for _ in 0..config.pattern_count {
            let start = rng.gen_range(0..total - config.pattern_length);
            inject_ramp(&mut values[start..start + config.pattern_length]);
        }
    }

    if let Some(degraded) = &config.degraded_device {
        let position = (0..config.device_count).position(|i| &device_name(i) == degraded);
        match position {
            Some(index) => {
                let start = index * config.samples_per_device;
                let half = config.samples_per_device / 2;
                inject_ramp(&mut values[start..start + half]);
            }
            None => tracing::warn!("Degraded device {} is not part of the fleet", degraded),
        }
    }

    let interval = Duration::hours(config.interval_hours);
    let readings: Vec<Reading> = values
        .into_iter()
        .enumerate()
        .map(|(i, measurements)| {
            let device = i / config.samples_per_device;
            let sample = (i % config.samples_per_device) as i32;
            Reading::new(
                device_name(device),
                config.start + interval * sample,
                measurements,
            )
        })
        .collect();

    tracing::info!(
        "Generated {} readings for {} devices every {}h",
        readings.len(),
        config.device_count,
        config.interval_hours
    );

    readings
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::classifier::Classifier;
    use chrono::TimeZone;

    fn small_config(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            device_count: 3,
            samples_per_device: 40,
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_linspace_endpoints() {
        // ---
        let v: Vec<f64> = linspace(240.0, 250.0, 11).collect();
        assert_eq!(v.len(), 11);
        assert_eq!(v[0], 240.0);
        assert!((v[10] - 250.0).abs() < 1e-9);
        assert!((v[5] - 245.0).abs() < 1e-9);

        assert_eq!(linspace(1.0, 2.0, 1).collect::<Vec<_>>(), vec![1.0]);
    }

    #[test]
    fn test_layout_and_naming() {
        // ---
        let readings = generate(&small_config(7));
        assert_eq!(readings.len(), 120);
        assert_eq!(readings[0].device_id, "MedDevice_000");
        assert_eq!(readings[40].device_id, "MedDevice_001");
        assert_eq!(readings[119].device_id, "MedDevice_002");

        assert_eq!(readings[0].timestamp, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(readings[1].timestamp, Utc.with_ymd_and_hms(2023, 1, 1, 6, 0, 0).unwrap());
        assert_eq!(readings[40].timestamp, readings[0].timestamp);
    }

    #[test]
    fn test_seed_is_deterministic() {
        // ---
        assert_eq!(generate(&small_config(42)), generate(&small_config(42)));
    }

    #[test]
    fn test_degraded_device_first_half_is_abnormal() {
        // ---
        let classifier = Classifier::default();
        let readings = generate(&small_config(3));

        let degraded: Vec<&Reading> = readings
            .iter()
            .filter(|r| r.device_id == "MedDevice_001")
            .collect();
        assert_eq!(degraded.len(), 40);
        for r in &degraded[..20] {
            assert!(classifier.classify(r).unwrap());
            assert!(r.measurements.voltage >= 240.0);
        }
    }

    #[test]
    fn test_baseline_stays_within_generation_ranges() {
        // ---
        let config = GeneratorConfig {
            pattern_count: 0,
            degraded_device: None,
            ..small_config(11)
        };
        for r in generate(&config) {
            let m = r.measurements;
            assert!((210.0..230.0).contains(&m.voltage));
            assert!((0.1..2.0).contains(&m.current));
            assert!((22.0..45.0).contains(&m.temperature));
            assert!((30.0..70.0).contains(&m.humidity));
            assert!(m.vibration.abs() <= 0.55);
        }
    }
}
