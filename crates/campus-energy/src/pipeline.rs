//! One run of the energy pipeline: ingest, merge, aggregate, report.

use std::io::{BufRead, Write};

use campus_core::error::{CampusError, Result};
use campus_core::prompt::Console;
use energy_data::aggregator::BuildingManager;
use energy_data::analysis::{analyze_dataset, merge_readings, EnergyAnalysis};
use energy_data::manual::collect_manual_readings;
use energy_data::reader::{load_directory, IngestReport};
use energy_report::dashboard::render_dashboard;
use energy_report::export::{write_building_summary, write_cleaned_data, OutputPaths};
use energy_report::summary::write_summary;
use tracing::{debug, error, info};

use crate::settings::{ManualEntry, Settings};

/// How a pipeline run ended.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Every output was written.
    Completed {
        paths: OutputPaths,
        analysis: EnergyAnalysis,
        ingest: IngestReport,
    },
    /// Neither the CSV files nor manual entry produced any reading.
    NoData { ingest: IngestReport },
}

/// Execute the pipeline described by `settings`, prompting on `console`.
pub fn run<R: BufRead, W: Write>(
    settings: &Settings,
    console: &mut Console<R, W>,
) -> Result<PipelineOutcome> {
    info!("Campus Energy Dashboard pipeline starting");

    let ingested = load_directory(&settings.data_dir);
    let ingest = ingested.report;
    info!(
        "Ingested {} files ({} skipped), {} rows read, {} dropped",
        ingest.files_loaded, ingest.files_skipped, ingest.rows_read, ingest.rows_dropped
    );

    let wants_manual = match settings.manual {
        ManualEntry::Yes => true,
        ManualEntry::No => false,
        ManualEntry::Ask => {
            console.confirm("Would you like to add manual entries? (y/N): ", "y")?
        }
    };
    let manual = if wants_manual {
        collect_manual_readings(console)?
    } else {
        Vec::new()
    };

    let dataset = merge_readings(ingested.dataset, manual);
    if dataset.is_empty() {
        error!("No data to process (CSV and/or user input)");
        return Ok(PipelineOutcome::NoData { ingest });
    }

    let analysis = analyze_dataset(dataset);
    for building in BuildingManager::from_dataset(&analysis.dataset).buildings() {
        debug!("{}", building.to_report());
    }

    std::fs::create_dir_all(&settings.output_dir).map_err(|source| CampusError::FileWrite {
        path: settings.output_dir.clone(),
        source,
    })?;
    let paths = OutputPaths::in_dir(&settings.output_dir);

    write_cleaned_data(&analysis.dataset, &paths.cleaned)?;
    write_building_summary(&analysis.buildings, &paths.building_summary)?;
    render_dashboard(&analysis, &paths.dashboard)?;
    write_summary(&analysis, &paths)?;

    info!("All outputs created successfully");
    Ok(PipelineOutcome::Completed {
        paths,
        analysis,
        ingest,
    })
}
