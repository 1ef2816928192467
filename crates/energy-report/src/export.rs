//! Output file locations and the CSV exports.

use std::path::{Path, PathBuf};

use campus_core::error::{CampusError, Result};
use campus_core::models::{BuildingSummary, Dataset};
use campus_core::time_utils::format_timestamp;
use tracing::info;

pub const CLEANED_FILE: &str = "cleaned_energy_data.csv";
pub const BUILDING_SUMMARY_FILE: &str = "building_summary.csv";
pub const DASHBOARD_FILE: &str = "dashboard.svg";
pub const SUMMARY_FILE: &str = "summary.txt";

/// Where each pipeline output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub cleaned: PathBuf,
    pub building_summary: PathBuf,
    pub dashboard: PathBuf,
    pub summary: PathBuf,
}

impl OutputPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cleaned: dir.join(CLEANED_FILE),
            building_summary: dir.join(BUILDING_SUMMARY_FILE),
            dashboard: dir.join(DASHBOARD_FILE),
            summary: dir.join(SUMMARY_FILE),
        }
    }
}

/// Absolute form of `path` for display; relative paths are joined onto the
/// working directory.
pub fn display_path(path: &Path) -> String {
    if path.is_absolute() {
        return path.display().to_string();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn csv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    let file = std::fs::File::create(path).map_err(|source| CampusError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Writer::from_writer(file))
}

/// Write the merged, cleaned readings as `timestamp,kwh,building`.
pub fn write_cleaned_data(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv_writer(path)?;
    writer.write_record(["timestamp", "kwh", "building"])?;
    for reading in dataset.readings() {
        writer.write_record([
            format_timestamp(&reading.timestamp),
            reading.kwh.to_string(),
            reading.building.clone(),
        ])?;
    }
    writer.flush()?;
    info!("Cleaned data saved to {}", display_path(path));
    Ok(())
}

/// Write one row per building, in summary order.
pub fn write_building_summary(summary: &[BuildingSummary], path: &Path) -> Result<()> {
    let mut writer = csv_writer(path)?;
    writer.write_record(["building", "mean", "min", "max", "total_kwh"])?;
    for row in summary {
        writer.write_record([
            row.building.clone(),
            row.mean.to_string(),
            row.min.to_string(),
            row.max.to_string(),
            row.total_kwh.to_string(),
        ])?;
    }
    writer.flush()?;
    info!("Building summary saved to {}", display_path(path));
    Ok(())
}
