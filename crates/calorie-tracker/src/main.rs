mod settings;
mod tracker;

use anyhow::Result;
use campus_core::logging::setup_logging;
use campus_core::prompt::Console;
use chrono::Local;
use clap::Parser;

use crate::settings::Settings;

const SAVE_ANSWER: &str = "yes";

const BANNER: &str = "====================================\n   Welcome to Daily Calorie Tracker\n====================================";

fn main() -> Result<()> {
    let settings = Settings::parse();
    setup_logging(&settings.log_level)?;

    let mut console = Console::stdio();
    console.say(BANNER)?;
    console.say("Record your meals, see total and average calories, and compare them with your daily limit.")?;
    console.say("")?;

    let Some(log) = tracker::collect_log(&mut console)? else {
        tracing::warn!("Input ended before the log was complete");
        return Ok(());
    };

    console.say("")?;
    console.say(log.render_summary().trim_end())?;
    console.say("")?;

    let save = settings.save
        || console.confirm(
            "Do you want to save this report to a file? (yes/no): ",
            SAVE_ANSWER,
        )?;
    if save {
        log.save(&settings.output, Local::now().naive_local())?;
        console.say(&format!(
            "Report saved as '{}'",
            settings.output.display()
        ))?;
    } else {
        console.say("Report not saved. Thank you for using Daily Calorie Tracker!")?;
    }

    Ok(())
}
