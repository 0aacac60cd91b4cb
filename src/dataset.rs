//! Session dataset and selection windows.
//!
//! A [`Dataset`] owns every reading of one session and is passed around by
//! value or `Arc`; nothing here is process-wide state. A [`Selection`]
//! narrows it to one device over an inclusive range of whole days.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::HealthError;
use crate::models::Reading;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    readings: Vec<Reading>,
    device_ids: Vec<String>,
}

impl Dataset {
    /// Wrap readings from a data source, checking its ordering contract.
    ///
    /// Per device, timestamps must be non-decreasing and no `(device_id,
    /// timestamp)` pair may repeat. Devices may be interleaved.
    pub fn from_readings(readings: Vec<Reading>) -> Result<Self, HealthError> {
        // ---
        let mut last_seen: HashMap<&str, DateTime<Utc>> = HashMap::new();
        let mut device_ids = Vec::new();

        for reading in &readings {
            match last_seen.get(reading.device_id.as_str()) {
                Some(prev) if reading.timestamp < *prev => {
                    return Err(HealthError::OutOfOrder {
                        device_id: reading.device_id.clone(),
                        timestamp: reading.timestamp,
                    });
                }
                Some(prev) if reading.timestamp == *prev => {
                    return Err(HealthError::DuplicateReading {
                        device_id: reading.device_id.clone(),
                        timestamp: reading.timestamp,
                    });
                }
                Some(_) => {}
                None => device_ids.push(reading.device_id.clone()),
            }
            last_seen.insert(reading.device_id.as_str(), reading.timestamp);
        }

        Ok(Dataset {
            readings,
            device_ids,
        })
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Device ids in first-seen order.
    pub fn device_ids(&self) -> &[String] {
        &self.device_ids
    }

    pub fn contains_device(&self, device_id: &str) -> bool {
        self.device_ids.iter().any(|d| d == device_id)
    }

    /// Earliest and latest timestamp across the whole dataset.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        // ---
        let min = self.readings.iter().map(|r| r.timestamp).min()?;
        let max = self.readings.iter().map(|r| r.timestamp).max()?;
        Some((min, max))
    }

    /// Default selection window: the dataset's full span, as dates.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.time_span().map(|(a, b)| (a.date_naive(), b.date_naive()))
    }

    pub fn readings_for<'a>(&'a self, device_id: &'a str) -> impl Iterator<Item = &'a Reading> + 'a {
        self.readings.iter().filter(move |r| r.device_id == device_id)
    }

    /// Readings for the selected device inside the selected days, in order.
    ///
    /// An empty result is not an error here; the aggregator reports it.
    pub fn select(&self, selection: &Selection) -> Result<Vec<Reading>, HealthError> {
        // ---
        if !self.contains_device(&selection.device_id) {
            return Err(HealthError::UnknownDevice(selection.device_id.clone()));
        }

        let (from, until) = selection.bounds();
        let selected: Vec<Reading> = self
            .readings_for(&selection.device_id)
            .filter(|r| r.timestamp >= from && until.map_or(true, |u| r.timestamp < u))
            .cloned()
            .collect();

        tracing::debug!(
            "Selected {} readings for {} between {} and {}",
            selected.len(),
            selection.device_id,
            selection.start,
            selection.end
        );

        Ok(selected)
    }
}

/// One device over an inclusive range of whole UTC days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub device_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Selection {
    pub fn new(device_id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Result<Self, HealthError> {
        // ---
        if start > end {
            return Err(HealthError::InvalidDateRange { start, end });
        }
        Ok(Selection {
            device_id: device_id.into(),
            start,
            end,
        })
    }

    /// Half-open timestamp interval `[start 00:00, end + 1 day 00:00)`.
    ///
    /// The upper bound is `None` when `end` is the last representable date.
    fn bounds(&self) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        // ---
        let from = self.start.and_time(chrono::NaiveTime::MIN).and_utc();
        let until = self
            .end
            .and_time(chrono::NaiveTime::MIN)
            .checked_add_signed(Duration::days(1))
            .map(|t| t.and_utc());
        (from, until)
    }
}
