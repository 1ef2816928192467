//! Interactive entry of extra meter readings.

use std::io::{BufRead, Write};

use campus_core::error::Result;
use campus_core::models::Reading;
use campus_core::prompt::Console;
use campus_core::time_utils::{parse_kwh, parse_timestamp};
use tracing::{info, warn};

/// Answer that ends the entry session at any prompt.
pub const SENTINEL: &str = "done";

const SEPARATOR: &str = "-----------------------";

fn is_sentinel(answer: &str) -> bool {
    answer.eq_ignore_ascii_case(SENTINEL)
}

/// Read one answer, mapping both end of input and the sentinel to `None`.
fn ask_or_stop<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<Option<String>> {
    Ok(console.ask(prompt)?.filter(|answer| !is_sentinel(answer)))
}

/// Collect `(building, timestamp, kWh)` rows until the user types `done`.
///
/// A row with an empty building, an unparseable timestamp or a non-numeric
/// kWh value is skipped with a warning; the session carries on.
pub fn collect_manual_readings<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Vec<Reading>> {
    let mut rows = Vec::new();

    console.say("")?;
    console.say("=== USER DATA ENTRY MODE ===")?;
    console.say(&format!(
        "Enter building data manually. Type '{}' anytime to stop.",
        SENTINEL
    ))?;

    loop {
        let Some(building) = ask_or_stop(console, "Enter building name (or 'done'): ")? else {
            break;
        };
        let Some(timestamp) =
            ask_or_stop(console, "Enter timestamp (YYYY-MM-DD HH:MM) [or 'done']: ")?
        else {
            break;
        };
        let Some(kwh) = ask_or_stop(console, "Enter kWh value: ")? else {
            break;
        };

        if building.is_empty() {
            warn!("Building name must not be empty. Row skipped.");
        } else {
            match (parse_timestamp(&timestamp), parse_kwh(&kwh)) {
                (_, Err(_)) => {
                    warn!("kWh must be a numeric value (e.g. 123.45). Row skipped.");
                }
                (Err(_), _) => {
                    warn!("Timestamp '{}' not recognised. Row skipped.", timestamp);
                }
                (Ok(ts), Ok(value)) => {
                    rows.push(Reading::new(ts, value, building));
                    console.say("[Added]")?;
                }
            }
        }
        console.say(SEPARATOR)?;
    }

    if rows.is_empty() {
        info!("No user data entered");
    } else {
        info!("User entered {} rows", rows.len());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Vec<Reading>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let rows = collect_manual_readings(&mut console).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        (rows, out)
    }

    #[test]
    fn test_collects_until_sentinel() {
        let (rows, out) = run("Library\n2024-01-01 10:00\n12.5\nGym\n2024-01-02 08:30\n3\ndone\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].building, "Library");
        assert_eq!(rows[0].kwh, 12.5);
        assert_eq!(rows[1].building, "Gym");
        assert_eq!(out.matches("[Added]").count(), 2);
    }

    #[test]
    fn test_sentinel_case_insensitive_at_any_prompt() {
        let (rows, _) = run("Library\nDONE\n");
        assert!(rows.is_empty());

        let (rows, _) = run("Library\n2024-01-01 10:00\nDone\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_invalid_kwh_skips_only_that_row() {
        let (rows, out) = run("Lab\n2024-01-01 10:00\nlots\nLab\n2024-01-01 11:00\n4.0\ndone\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kwh, 4.0);
        assert_eq!(out.matches("[Added]").count(), 1);
    }

    #[test]
    fn test_invalid_timestamp_skips_row() {
        let (rows, _) = run("Lab\nsoon\n1.0\ndone\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_building_skips_row() {
        let (rows, _) = run("\n2024-01-01 10:00\n1.0\ndone\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (rows, _) = run("Lab\n2024-01-01 10:00\n1.0\n");
        assert_eq!(rows.len(), 1);
    }
}
