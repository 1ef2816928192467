use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Whether to collect manually entered readings before aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManualEntry {
    /// Ask on the console.
    Ask,
    /// Always open the entry session.
    Yes,
    /// Never open the entry session.
    No,
}

/// Build a campus energy dashboard from per-building meter CSV files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "campus-energy",
    about = "Build a campus energy dashboard from per-building meter CSV files",
    version
)]
pub struct Settings {
    /// Directory holding one `<building>.csv` file per building
    #[arg(default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory the cleaned data, summaries and dashboard are written to
    #[arg(long, env = "CAMPUS_ENERGY_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Collect extra readings interactively
    #[arg(long, value_enum, default_value_t = ManualEntry::Ask)]
    pub manual: ManualEntry,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}
