mod pipeline;
mod settings;

use anyhow::Result;
use campus_core::logging::setup_logging;
use campus_core::prompt::Console;
use clap::Parser;

use crate::pipeline::PipelineOutcome;
use crate::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::parse();
    setup_logging(settings.effective_log_level())?;

    tracing::info!("Campus Energy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Output: {}",
        settings.data_dir.display(),
        settings.output_dir.display()
    );

    let mut console = Console::stdio();
    match pipeline::run(&settings, &mut console)? {
        PipelineOutcome::Completed { paths, analysis, .. } => {
            println!(
                "Processed {} readings from {} buildings.",
                analysis.metadata.readings, analysis.metadata.buildings
            );
            println!("Report: {}", paths.summary.display());
        }
        PipelineOutcome::NoData { ingest } => {
            eprintln!(
                "No data to process ({} files skipped, {} rows dropped). Nothing was written.",
                ingest.files_skipped, ingest.rows_dropped
            );
        }
    }

    Ok(())
}
