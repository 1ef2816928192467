use std::path::PathBuf;

use clap::Parser;

/// Default report file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "calorie_log.txt";

/// Record today's meals and compare them with a calorie limit
#[derive(Parser, Debug, Clone)]
#[command(
    name = "calorie-tracker",
    about = "Record today's meals and compare them with a calorie limit",
    version
)]
pub struct Settings {
    /// Where the report is saved
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Save the report without asking
    #[arg(long)]
    pub save: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}
