//! End-to-end analysis of a merged dataset.
//!
//! Turns the readings gathered from CSV files and manual entry into every
//! derived view the report layer needs.

use campus_core::models::{BuildingSummary, Dataset, PeriodTotal, Reading};
use chrono::NaiveDate;
use tracing::info;

use crate::aggregator::EnergyAggregator;

// ── Public types ──────────────────────────────────────────────────────────────

/// Descriptive facts about the analysed dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisMetadata {
    /// Number of readings analysed.
    pub readings: usize,
    /// Number of distinct buildings.
    pub buildings: usize,
    /// First calendar day with data.
    pub start: Option<NaiveDate>,
    /// Last calendar day with data.
    pub end: Option<NaiveDate>,
}

/// Every derived view of one dataset.
#[derive(Debug, Clone)]
pub struct EnergyAnalysis {
    pub dataset: Dataset,
    pub daily: Vec<PeriodTotal>,
    pub weekly: Vec<PeriodTotal>,
    /// Per-building statistics, largest total first.
    pub buildings: Vec<BuildingSummary>,
    pub total_kwh: f64,
    pub metadata: AnalysisMetadata,
}

impl EnergyAnalysis {
    /// The single largest reading.
    pub fn peak_reading(&self) -> Option<&Reading> {
        EnergyAggregator::peak_reading(&self.dataset)
    }

    /// The building with the highest total consumption.
    pub fn top_building(&self) -> Option<&BuildingSummary> {
        self.buildings.first()
    }

    pub fn highest_day(&self) -> Option<&PeriodTotal> {
        EnergyAggregator::highest_period(&self.daily)
    }

    pub fn highest_week(&self) -> Option<&PeriodTotal> {
        EnergyAggregator::highest_period(&self.weekly)
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Concatenate manually entered readings onto ingested ones.
///
/// No de-duplication; the result is re-sorted by timestamp.
pub fn merge_readings(ingested: Dataset, manual: Vec<Reading>) -> Dataset {
    if manual.is_empty() {
        return ingested;
    }
    let merged = ingested.merge(manual);
    info!("Final dataset size after merging: {} rows", merged.len());
    merged
}

/// Run every aggregation over `dataset`.
pub fn analyze_dataset(dataset: Dataset) -> EnergyAnalysis {
    let daily = EnergyAggregator::daily_totals(&dataset);
    let weekly = EnergyAggregator::weekly_totals(&dataset);
    let buildings = EnergyAggregator::building_summary(&dataset);
    let total_kwh = dataset.total_kwh();

    let range = dataset.time_range();
    let metadata = AnalysisMetadata {
        readings: dataset.len(),
        buildings: buildings.len(),
        start: range.map(|(start, _)| start.date()),
        end: range.map(|(_, end)| end.date()),
    };

    EnergyAnalysis {
        dataset,
        daily,
        weekly,
        buildings,
        total_kwh,
        metadata,
    }
}
