use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single timestamped meter reading for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Wall-clock time of the measurement.
    pub timestamp: NaiveDateTime,
    /// Energy consumed, in kilowatt-hours.
    pub kwh: f64,
    /// Building identifier (the source file stem for CSV input).
    pub building: String,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, kwh: f64, building: impl Into<String>) -> Self {
        Self {
            timestamp,
            kwh,
            building: building.into(),
        }
    }
}

/// Readings ordered by timestamp ascending.
///
/// Construction always sorts, so every consumer can rely on the order.
/// The sort is stable: readings sharing a timestamp keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    readings: Vec<Reading>,
}

impl Dataset {
    pub fn new(mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        Self { readings }
    }

    /// Concatenate `extra` onto this dataset without de-duplication.
    pub fn merge(self, extra: Vec<Reading>) -> Self {
        let mut readings = self.readings;
        readings.extend(extra);
        Self::new(readings)
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Sum of kWh across every reading.
    pub fn total_kwh(&self) -> f64 {
        self.readings.iter().map(|r| r.kwh).sum()
    }

    /// First and last timestamps, or `None` when empty.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.readings.first()?;
        let last = self.readings.last()?;
        Some((first.timestamp, last.timestamp))
    }
}

/// Per-building statistics over its readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub building: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub total_kwh: f64,
    pub readings: usize,
}

/// Summed consumption for one calendar bucket.
///
/// `period` is the day itself for daily totals and the closing Sunday for
/// weekly totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: NaiveDate,
    pub kwh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_dataset_sorted_on_construction() {
        let ds = Dataset::new(vec![
            Reading::new(ts("2024-01-02 10:00"), 2.0, "b"),
            Reading::new(ts("2024-01-01 10:00"), 1.0, "a"),
        ]);
        assert_eq!(ds.readings()[0].building, "a");
        assert_eq!(ds.readings()[1].building, "b");
    }

    #[test]
    fn test_dataset_sort_is_stable() {
        let ds = Dataset::new(vec![
            Reading::new(ts("2024-01-01 10:00"), 1.0, "first"),
            Reading::new(ts("2024-01-01 10:00"), 2.0, "second"),
        ]);
        assert_eq!(ds.readings()[0].building, "first");
        assert_eq!(ds.readings()[1].building, "second");
    }

    #[test]
    fn test_dataset_merge_keeps_duplicates() {
        let reading = Reading::new(ts("2024-01-01 10:00"), 1.0, "a");
        let ds = Dataset::new(vec![reading.clone()]).merge(vec![
            reading.clone(),
            Reading::new(ts("2023-12-31 09:00"), 4.0, "manual"),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.readings()[0].building, "manual");
        assert!((ds.total_kwh() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_dataset_time_range() {
        assert!(Dataset::default().time_range().is_none());

        let ds = Dataset::new(vec![
            Reading::new(ts("2024-01-03 10:00"), 1.0, "a"),
            Reading::new(ts("2024-01-01 08:00"), 1.0, "a"),
        ]);
        let (start, end) = ds.time_range().unwrap();
        assert_eq!(start, ts("2024-01-01 08:00"));
        assert_eq!(end, ts("2024-01-03 10:00"));
    }
}
