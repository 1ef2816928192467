//! Four-panel consumption dashboard.
//!
//! Layout (2 x 2):
//! - top-left: daily totals as a line
//! - top-right: dataset metadata as text
//! - bottom-left: total per building as bars
//! - bottom-right: every raw reading as a scatter over time

use std::ops::Range;
use std::path::Path;

use campus_core::error::{CampusError, Result};
use campus_core::models::{BuildingSummary, PeriodTotal, Reading};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use energy_data::analysis::{AnalysisMetadata, EnergyAnalysis};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::export::display_path;

/// Canvas size in pixels.
pub const CHART_SIZE: (u32, u32) = (1400, 900);

const FONT: &str = "sans-serif";
const NOT_AVAILABLE: &str = "N/A";

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the dashboard for `analysis` to an SVG file at `path`.
pub fn render_dashboard(analysis: &EnergyAnalysis, path: &Path) -> Result<()> {
    draw_to_file(analysis, path).map_err(|e| CampusError::Render(e.to_string()))?;
    info!("Dashboard saved to {}", display_path(path));
    Ok(())
}

/// Render the dashboard for `analysis` into an in-memory SVG document.
pub fn render_dashboard_svg(analysis: &EnergyAnalysis) -> Result<String> {
    let mut svg = String::new();
    draw_to_string(analysis, &mut svg).map_err(|e| CampusError::Render(e.to_string()))?;
    Ok(svg)
}

fn draw_to_file(analysis: &EnergyAnalysis, path: &Path) -> DrawResult<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    draw_dashboard(&root, analysis)?;
    root.present()?;
    Ok(())
}

fn draw_to_string(analysis: &EnergyAnalysis, svg: &mut String) -> DrawResult<()> {
    let root = SVGBackend::with_string(svg, CHART_SIZE).into_drawing_area();
    draw_dashboard(&root, analysis)?;
    root.present()?;
    Ok(())
}

// ── Panels ────────────────────────────────────────────────────────────────────

fn draw_dashboard<DB>(root: &DrawingArea<DB, Shift>, analysis: &EnergyAnalysis) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));

    draw_daily_trend(&panels[0], &analysis.daily)?;
    draw_metadata(&panels[1], &analysis.metadata, analysis.total_kwh)?;
    draw_building_bars(&panels[2], &analysis.buildings)?;
    draw_reading_scatter(&panels[3], analysis.dataset.readings())?;
    Ok(())
}

fn draw_daily_trend<DB>(area: &DrawingArea<DB, Shift>, daily: &[PeriodTotal]) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let first_day = daily.first().map(|p| p.period);
    let x_max = daily.len().saturating_sub(1).max(1) as f64;
    let y_range = value_range(daily.iter().map(|p| p.kwh));

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Electricity Consumption", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, y_range)?;

    let label = |x: &f64| day_label(first_day, *x);
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("kWh")
        .x_labels(8)
        .x_label_formatter(&label)
        .draw()?;

    chart.draw_series(LineSeries::new(
        daily.iter().enumerate().map(|(i, p)| (i as f64, p.kwh)),
        &BLUE,
    ))?;
    Ok(())
}

fn draw_metadata<DB>(
    area: &DrawingArea<DB, Shift>,
    metadata: &AnalysisMetadata,
    total_kwh: f64,
) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let lines = metadata_lines(metadata, total_kwh);
    for (i, line) in lines.iter().enumerate() {
        let y = 120 + i as i32 * 40;
        area.draw(&Text::new(line.as_str(), (40, y), (FONT, 24)))?;
    }
    Ok(())
}

fn draw_building_bars<DB>(
    area: &DrawingArea<DB, Shift>,
    summary: &[BuildingSummary],
) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let count = summary.len().max(1) as u32;
    let y_range = value_range(summary.iter().map(|s| s.total_kwh));

    let mut chart = ChartBuilder::on(area)
        .caption("Total Consumption per Building", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..count).into_segmented(), y_range)?;

    let label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => summary
            .get(*i as usize)
            .map(|s| s.building.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Building")
        .y_desc("kWh")
        .x_labels(summary.len().max(1))
        .x_label_formatter(&label)
        .draw()?;

    chart.draw_series(summary.iter().enumerate().map(|(i, s)| {
        let i = i as u32;
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), s.total_kwh),
            ],
            BLUE.mix(0.7).filled(),
        )
    }))?;
    Ok(())
}

fn draw_reading_scatter<DB>(area: &DrawingArea<DB, Shift>, readings: &[Reading]) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let origin = readings.first().map(|r| r.timestamp);
    let offset = |ts: NaiveDateTime| {
        origin
            .map(|o| (ts - o).num_seconds() as f64 / 86_400.0)
            .unwrap_or(0.0)
    };
    let x_max = readings
        .last()
        .map(|r| offset(r.timestamp))
        .unwrap_or(0.0)
        .max(1.0);
    let y_range = value_range(readings.iter().map(|r| r.kwh));

    let mut chart = ChartBuilder::on(area)
        .caption("Individual Meter Readings (kWh over time)", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, y_range)?;

    let first_day = origin.map(|o| o.date());
    let label = |x: &f64| day_label(first_day, x.floor());
    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("kWh")
        .x_labels(8)
        .x_label_formatter(&label)
        .draw()?;

    chart.draw_series(
        readings
            .iter()
            .map(|r| Circle::new((offset(r.timestamp), r.kwh), 3, BLUE.filled())),
    )?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Text shown in the metadata panel.
fn metadata_lines(metadata: &AnalysisMetadata, total_kwh: f64) -> Vec<String> {
    let date_or_na = |d: Option<NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    vec![
        format!("Total buildings: {}", metadata.buildings),
        format!("Readings: {}", metadata.readings),
        format!("Total: {:.2} kWh", total_kwh),
        format!("Start: {}", date_or_na(metadata.start)),
        format!("End: {}", date_or_na(metadata.end)),
    ]
}

/// Axis label for a day offset from `first_day`.
fn day_label(first_day: Option<NaiveDate>, offset_days: f64) -> String {
    first_day
        .map(|d| {
            (d + Duration::days(offset_days.round() as i64))
                .format("%m-%d")
                .to_string()
        })
        .unwrap_or_default()
}

/// Axis range covering `values` and zero, with 10% headroom.
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if span <= 0.0 {
        return 0.0..1.0;
    }
    let pad = span * 0.1;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    lo..hi + pad
}

// ── Tests ─────────────────────────────────────────────────────────────────────
