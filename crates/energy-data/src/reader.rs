//! CSV discovery and loading for per-building meter files.
//!
//! Every `*.csv` file directly inside the data directory holds the readings of
//! one building; the file stem becomes the building identifier.

use std::fs::File;
use std::path::{Path, PathBuf};

use campus_core::error::{CampusError, Result};
use campus_core::models::{Dataset, Reading};
use campus_core::time_utils::{parse_kwh, parse_timestamp};
use csv::StringRecord;
use tracing::{debug, info, warn};

const TIMESTAMP_COLUMN: &str = "timestamp";
const KWH_COLUMN: &str = "kwh";

// ── Public types ──────────────────────────────────────────────────────────────

/// Counters describing one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Files that contributed (possibly zero) readings.
    pub files_loaded: usize,
    /// Files skipped as empty, unreadable or missing required columns.
    pub files_skipped: usize,
    /// Data rows seen across all loaded files.
    pub rows_read: usize,
    /// Rows discarded because the timestamp or kWh did not parse.
    pub rows_dropped: usize,
}

/// Readings from a directory plus the counters gathered while reading it.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub dataset: Dataset,
    pub report: IngestReport,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find the `.csv` files directly under `data_dir`, sorted by path.
pub fn find_csv_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.is_dir() {
        warn!("Data folder not found: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load every building CSV in `data_dir` into one sorted [`Dataset`].
///
/// Never fails: a missing or empty directory, or a directory where every
/// file is invalid, yields an empty dataset and a logged warning.
pub fn load_directory(data_dir: &Path) -> Ingested {
    let files = find_csv_files(data_dir);
    if files.is_empty() {
        warn!("No CSV files found in {}", data_dir.display());
        return Ingested::default();
    }

    let mut report = IngestReport::default();
    let mut readings: Vec<Reading> = Vec::new();

    for path in &files {
        match load_building_file(path) {
            Ok(loaded) => {
                info!("Loaded: {} ({} rows)", display_name(path), loaded.rows_read);
                report.files_loaded += 1;
                report.rows_read += loaded.rows_read;
                report.rows_dropped += loaded.rows_read - loaded.readings.len();
                readings.extend(loaded.readings);
            }
            Err(e) => {
                warn!("Skipping {}: {}", display_name(path), e);
                report.files_skipped += 1;
            }
        }
    }

    if report.rows_dropped > 0 {
        info!(
            "Dropped {} rows with invalid timestamps or kwh values",
            report.rows_dropped
        );
    }
    if readings.is_empty() {
        warn!("No valid CSV data was loaded from {}", data_dir.display());
    }

    let dataset = Dataset::new(readings);
    debug!(
        "Ingested {} readings from {} files ({} skipped)",
        dataset.len(),
        report.files_loaded,
        report.files_skipped
    );

    Ingested { dataset, report }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

struct LoadedFile {
    readings: Vec<Reading>,
    rows_read: usize,
}

/// Building identifier for a file: its name without the extension.
fn building_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Position of `name` in `headers`, ignoring case and surrounding spaces.
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn load_building_file(path: &Path) -> Result<LoadedFile> {
    let file = File::open(path).map_err(|source| CampusError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CampusError::Layout("empty file".to_string()));
    }

    let (Some(ts_idx), Some(kwh_idx)) = (
        column_index(&headers, TIMESTAMP_COLUMN),
        column_index(&headers, KWH_COLUMN),
    ) else {
        return Err(CampusError::Layout(
            "missing required columns ('timestamp','kwh')".to_string(),
        ));
    };

    let building = building_name(path);
    let mut readings = Vec::new();
    let mut rows_read = 0usize;

    for record in reader.records() {
        rows_read += 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!("Unreadable row in {}: {}", display_name(path), e);
                continue;
            }
        };
        if let Some(reading) = record_to_reading(&record, ts_idx, kwh_idx, &building) {
            readings.push(reading);
        }
    }

    Ok(LoadedFile {
        readings,
        rows_read,
    })
}

fn record_to_reading(
    record: &StringRecord,
    ts_idx: usize,
    kwh_idx: usize,
    building: &str,
) -> Option<Reading> {
    let timestamp = parse_timestamp(record.get(ts_idx)?).ok()?;
    let kwh = parse_kwh(record.get(kwh_idx)?).ok()?;
    Some(Reading::new(timestamp, kwh, building))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
