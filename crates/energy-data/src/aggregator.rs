//! Consumption aggregation over calendar buckets and buildings.

use std::collections::BTreeMap;

use campus_core::models::{BuildingSummary, Dataset, PeriodTotal, Reading};
use campus_core::time_utils::week_ending;
use chrono::{Duration, NaiveDate};

// ── EnergyAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups readings by day, week or building.
pub struct EnergyAggregator;

impl EnergyAggregator {
    /// Total kWh per calendar day, from the first to the last day with data.
    ///
    /// Days without readings inside that span are present with `0.0`.
    pub fn daily_totals(dataset: &Dataset) -> Vec<PeriodTotal> {
        Self::aggregate_by_bucket(dataset.readings(), |d| d, 1)
    }

    /// Total kWh per week, each week labelled by the Sunday that ends it.
    ///
    /// Weeks without readings inside the span are present with `0.0`.
    pub fn weekly_totals(dataset: &Dataset) -> Vec<PeriodTotal> {
        Self::aggregate_by_bucket(dataset.readings(), week_ending, 7)
    }

    /// Mean, min, max and total kWh per building, largest total first.
    ///
    /// Buildings with equal totals are ordered by name.
    pub fn building_summary(dataset: &Dataset) -> Vec<BuildingSummary> {
        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for reading in dataset.readings() {
            groups
                .entry(reading.building.as_str())
                .or_default()
                .push(reading.kwh);
        }

        let mut summaries: Vec<BuildingSummary> = groups
            .into_iter()
            .map(|(building, values)| {
                let total: f64 = values.iter().sum();
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                BuildingSummary {
                    building: building.to_string(),
                    mean: total / values.len() as f64,
                    min,
                    max,
                    total_kwh: total,
                    readings: values.len(),
                }
            })
            .collect();

        // BTreeMap order is by name, so a stable sort keeps names ascending
        // among equal totals.
        summaries.sort_by(|a, b| b.total_kwh.total_cmp(&a.total_kwh));
        summaries
    }

    /// The single largest reading; the earliest one wins a tie.
    pub fn peak_reading(dataset: &Dataset) -> Option<&Reading> {
        dataset.readings().iter().fold(None, |best, r| match best {
            Some(b) if b.kwh >= r.kwh => Some(b),
            _ => Some(r),
        })
    }

    /// The bucket with the highest total; the earliest one wins a tie.
    pub fn highest_period(periods: &[PeriodTotal]) -> Option<&PeriodTotal> {
        periods.iter().fold(None, |best, p| match best {
            Some(b) if b.kwh >= p.kwh => Some(b),
            _ => Some(p),
        })
    }

    /// Sum of a set of period totals.
    pub fn sum_periods(periods: &[PeriodTotal]) -> f64 {
        periods.iter().map(|p| p.kwh).sum()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic aggregation driver.
    ///
    /// `bucket_fn` maps a calendar day to its bucket label and `step_days` is
    /// the distance between consecutive labels.
    fn aggregate_by_bucket(
        readings: &[Reading],
        bucket_fn: impl Fn(NaiveDate) -> NaiveDate,
        step_days: i64,
    ) -> Vec<PeriodTotal> {
        let mut map: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for reading in readings {
            *map.entry(bucket_fn(reading.timestamp.date())).or_insert(0.0) += reading.kwh;
        }

        let (Some(&first), Some(&last)) = (map.keys().next(), map.keys().next_back()) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut period = first;
        while period <= last {
            out.push(PeriodTotal {
                period,
                kwh: map.get(&period).copied().unwrap_or(0.0),
            });
            match period.checked_add_signed(Duration::days(step_days)) {
                Some(next) => period = next,
                None => break,
            }
        }
        out
    }
}

// ── Building / BuildingManager ────────────────────────────────────────────────

/// One building and the readings attributed to it.
#[derive(Debug, Clone)]
pub struct Building {
    pub name: String,
    readings: Vec<Reading>,
}

impl Building {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            readings: Vec::new(),
        }
    }

    pub fn add_reading(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn total_consumption(&self) -> f64 {
        self.readings.iter().map(|r| r.kwh).sum()
    }

    /// One-line description, e.g. `"Building Library: 42.00 kWh over 3 readings"`.
    pub fn to_report(&self) -> String {
        format!(
            "Building {}: {:.2} kWh over {} readings",
            self.name,
            self.total_consumption(),
            self.readings.len()
        )
    }
}

/// Readings grouped into [`Building`]s, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct BuildingManager {
    buildings: BTreeMap<String, Building>,
}

impl BuildingManager {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut manager = Self::default();
        for reading in dataset.readings() {
            manager
                .buildings
                .entry(reading.building.clone())
                .or_insert_with(|| Building::new(reading.building.clone()))
                .add_reading(reading.clone());
        }
        manager
    }

    pub fn get(&self, name: &str) -> Option<&Building> {
        self.buildings.get(name)
    }

    /// Buildings in name order.
    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn summary_totals(&self) -> BTreeMap<String, f64> {
        self.buildings
            .iter()
            .map(|(name, b)| (name.clone(), b.total_consumption()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
