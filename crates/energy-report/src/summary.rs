//! Plain-text consumption report.

use std::path::Path;

use campus_core::error::{CampusError, Result};
use campus_core::time_utils::format_timestamp;
use energy_data::analysis::EnergyAnalysis;
use tracing::info;

use crate::export::{display_path, OutputPaths};

const NOT_AVAILABLE: &str = "N/A";

/// Render the report text for `analysis`, listing the files in `paths`.
pub fn render_summary(analysis: &EnergyAnalysis, paths: &OutputPaths) -> String {
    let (top_name, top_value) = analysis
        .top_building()
        .map(|b| (b.building.as_str(), b.total_kwh))
        .unwrap_or((NOT_AVAILABLE, 0.0));

    let (peak_time, peak_value) = analysis
        .peak_reading()
        .map(|r| (format_timestamp(&r.timestamp), r.kwh))
        .unwrap_or_else(|| (NOT_AVAILABLE.to_string(), 0.0));

    let mut lines = vec![
        "Campus Energy Consumption Report".to_string(),
        "----------------------------------------".to_string(),
        format!("Total Campus Consumption: {:.2} kWh", analysis.total_kwh),
        String::new(),
        "Highest Consuming Building:".to_string(),
        format!("- {}: {:.2} kWh", top_name, top_value),
        String::new(),
        "Peak Load:".to_string(),
        format!("- Timestamp: {}", peak_time),
        format!("- kWh: {:.2}", peak_value),
        String::new(),
        "Insights:".to_string(),
    ];

    if let Some(day) = analysis.highest_day() {
        lines.push(format!(
            "- Day with highest consumption: {} ({:.2} kWh)",
            day.period, day.kwh
        ));
    }
    if let Some(week) = analysis.highest_week() {
        lines.push(format!(
            "- Week with highest consumption ending on: {} ({:.2} kWh)",
            week.period, week.kwh
        ));
    }

    lines.push(String::new());
    lines.push(format!("Dashboard file: {}", display_path(&paths.dashboard)));
    lines.push(format!("Cleaned data file: {}", display_path(&paths.cleaned)));
    lines.push(format!(
        "Building summary file: {}",
        display_path(&paths.building_summary)
    ));

    lines.join("\n")
}

/// Render the report and write it to `paths.summary`.
pub fn write_summary(analysis: &EnergyAnalysis, paths: &OutputPaths) -> Result<()> {
    write_text(&paths.summary, &render_summary(analysis, paths))?;
    info!("Summary report written to {}", display_path(&paths.summary));
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| CampusError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
