//! Meal log, totals against a daily limit, and the printable report.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::Path;

use campus_core::error::{CampusError, Result};
use campus_core::formatting::fit_width;
use campus_core::prompt::Console;
use campus_core::time_utils::format_timestamp;
use chrono::NaiveDateTime;
use tracing::{debug, info};

/// Largest meal count accepted in one session.
pub const MAX_MEALS: usize = 100;

const NAME_WIDTH: usize = 15;
const RULE: &str = "-------------------------------------------";

/// One meal and its calorie count.
#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub name: String,
    pub calories: f64,
}

impl Meal {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            calories,
        }
    }
}

/// Where the day's total stands against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalorieStatus {
    Within,
    Exceeded,
}

impl fmt::Display for CalorieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalorieStatus::Within => write!(f, "You are within your calorie limit."),
            CalorieStatus::Exceeded => write!(f, "You exceeded your calorie limit!"),
        }
    }
}

/// A day's meals together with the calorie limit they are measured against.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    pub meals: Vec<Meal>,
    pub limit: f64,
}

impl DailyLog {
    pub fn new(meals: Vec<Meal>, limit: f64) -> Self {
        Self { meals, limit }
    }

    pub fn total(&self) -> f64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    /// Mean calories per meal, `0.0` for a day without meals.
    pub fn average(&self) -> f64 {
        if self.meals.is_empty() {
            0.0
        } else {
            self.total() / self.meals.len() as f64
        }
    }

    /// Exceeded only when the total is strictly above the limit.
    pub fn status(&self) -> CalorieStatus {
        if self.total() > self.limit {
            CalorieStatus::Exceeded
        } else {
            CalorieStatus::Within
        }
    }

    /// The meal table with total and average rows, one line per entry.
    pub fn table_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}  {:>10}", fit_width("Meal Name", NAME_WIDTH), "Calories"),
            RULE.to_string(),
        ];
        for meal in &self.meals {
            lines.push(format!(
                "{}  {:>10.1}",
                fit_width(&meal.name, NAME_WIDTH),
                meal.calories
            ));
        }
        lines.push(RULE.to_string());
        lines.push(format!("{}  {:>10.1}", fit_width("Total:", NAME_WIDTH), self.total()));
        lines.push(format!(
            "{}  {:>10.2}",
            fit_width("Average:", NAME_WIDTH),
            self.average()
        ));
        lines
    }

    /// Console summary printed after collection.
    pub fn render_summary(&self) -> String {
        let mut out = String::from("========== Daily Calorie Summary ==========\n\n");
        for line in self.table_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&self.status().to_string());
        out.push('\n');
        out
    }

    /// Report file content, stamped with `generated`.
    pub fn render_report(&self, generated: NaiveDateTime) -> String {
        let mut out = String::from("===== Daily Calorie Tracker Report =====\n");
        out.push_str(&format!("Date & Time: {}\n\n", format_timestamp(&generated)));
        for line in self.table_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!("Limit:   {:.1}\n", self.limit));
        out.push_str(&format!("Status:  {}\n", self.status()));
        out
    }

    /// Write the report to `path`, replacing any previous one.
    pub fn save(&self, path: &Path, generated: NaiveDateTime) -> Result<()> {
        std::fs::write(path, self.render_report(generated)).map_err(|source| {
            CampusError::FileWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("Saved calorie report to {}", path.display());
        Ok(())
    }
}

fn non_negative(value: &f64) -> bool {
    value.is_finite() && *value >= 0.0
}

/// Prompt for the meal count, each meal, and the daily limit.
///
/// Invalid numbers are rejected and asked again. Returns `Ok(None)` when
/// input ends before the log is complete.
pub fn collect_log<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<DailyLog>> {
    let Some(count) = console.ask_parsed::<usize, _>(
        "How many meals did you have today? ",
        "Please enter a whole number from 0 to 100.",
        |n| *n <= MAX_MEALS,
    )?
    else {
        return Ok(None);
    };

    let mut meals = Vec::new();
    for i in 1..=count {
        console.say("")?;
        console.say(&format!("Meal {}:", i))?;
        let Some(name) = console.ask("Enter meal name: ")? else {
            return Ok(None);
        };
        let name = if name.is_empty() {
            format!("Meal {}", i)
        } else {
            name
        };
        let Some(calories) = console.ask_parsed::<f64, _>(
            "Enter calories for this meal: ",
            "Please enter a non-negative number.",
            non_negative,
        )?
        else {
            return Ok(None);
        };
        debug!("Meal {}: {} ({} kcal)", i, name, calories);
        meals.push(Meal::new(name, calories));
    }

    console.say("")?;
    let Some(limit) = console.ask_parsed::<f64, _>(
        "Enter your daily calorie limit: ",
        "Please enter a non-negative number.",
        non_negative,
    )?
    else {
        return Ok(None);
    };

    Ok(Some(DailyLog::new(meals, limit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn sample() -> DailyLog {
        DailyLog::new(
            vec![
                Meal::new("Oatmeal", 350.0),
                Meal::new("Chicken salad", 600.0),
                Meal::new("Pasta", 850.0),
            ],
            2000.0,
        )
    }

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(20, 15, 0)
            .unwrap()
    }

    fn collect(input: &str) -> (Option<DailyLog>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let log = collect_log(&mut console).unwrap();
        (log, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_totals_and_status() {
        let log = sample();
        assert_eq!(log.total(), 1800.0);
        assert_eq!(log.average(), 600.0);
        assert_eq!(log.status(), CalorieStatus::Within);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let at_limit = DailyLog::new(vec![Meal::new("Feast", 2000.0)], 2000.0);
        assert_eq!(at_limit.status(), CalorieStatus::Within);

        let over = DailyLog::new(vec![Meal::new("Feast", 2000.5)], 2000.0);
        assert_eq!(over.status(), CalorieStatus::Exceeded);
    }

    #[test]
    fn test_no_meals_average_is_zero() {
        let log = DailyLog::new(Vec::new(), 1500.0);
        assert_eq!(log.total(), 0.0);
        assert_eq!(log.average(), 0.0);
        assert_eq!(log.status(), CalorieStatus::Within);
    }

    #[test]
    fn test_summary_lists_meals() {
        let summary = sample().render_summary();
        assert!(summary.contains("Oatmeal"));
        assert!(summary.contains("1800.0"));
        assert!(summary.contains("600.00"));
        assert!(summary.ends_with("You are within your calorie limit.\n"));
    }

    #[test]
    fn test_report_has_timestamp_and_status() {
        let report = sample().render_report(generated());
        assert!(report.starts_with("===== Daily Calorie Tracker Report =====\n"));
        assert!(report.contains("Date & Time: 2024-03-01 20:15:00"));
        assert!(report.contains("Status:  You are within your calorie limit."));
    }

    #[test]
    fn test_save_writes_report() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("calorie_log.txt");

        sample().save(&path, generated()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, sample().render_report(generated()));
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("log.txt");
        let err = sample().save(&path, generated()).unwrap_err();
        assert!(matches!(err, CampusError::FileWrite { .. }));
    }

    #[test]
    fn test_collect_log() {
        let (log, _) = collect("2\nToast\n200\nSoup\n150.5\n1800\n");
        let log = log.unwrap();
        assert_eq!(
            log.meals,
            vec![Meal::new("Toast", 200.0), Meal::new("Soup", 150.5)]
        );
        assert_eq!(log.limit, 1800.0);
    }

    #[test]
    fn test_collect_reprompts_on_invalid_numbers() {
        let (log, out) = collect("two\n-1\n1\nToast\nlots\n-5\n200\nabc\n1500\n");
        let log = log.unwrap();
        assert_eq!(log.meals, vec![Meal::new("Toast", 200.0)]);
        assert_eq!(log.limit, 1500.0);
        assert_eq!(out.matches("Please enter a whole number").count(), 2);
        assert_eq!(out.matches("Please enter a non-negative number.").count(), 3);
    }

    #[test]
    fn test_collect_reprompts_on_oversized_meal_count() {
        let (log, out) = collect("18446744073709551615\n1000000000000\n101\n0\n1200\n");
        let log = log.unwrap();
        assert!(log.meals.is_empty());
        assert_eq!(log.limit, 1200.0);
        assert_eq!(out.matches("Please enter a whole number from 0 to 100.").count(), 3);
    }

    #[test]
    fn test_collect_unnamed_meal() {
        let (log, _) = collect("1\n\n300\n2000\n");
        assert_eq!(log.unwrap().meals[0].name, "Meal 1");
    }

    #[test]
    fn test_collect_stops_at_end_of_input() {
        let (log, _) = collect("2\nToast\n200\n");
        assert!(log.is_none());
    }
}
