use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{CampusError, Result};

/// Earliest year a reading may carry.
pub const MIN_YEAR: i32 = 1677;
/// Latest year a reading may carry.
pub const MAX_YEAR: i32 = 2262;

/// Naive formats tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a meter timestamp into a naive wall-clock [`NaiveDateTime`].
///
/// Offset-qualified RFC 3339 values are converted to UTC. A bare
/// `YYYY-MM-DD` date resolves to midnight. Years outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`] are rejected.
///
/// ```
/// use campus_core::time_utils::parse_timestamp;
///
/// let ts = parse_timestamp("2024-03-01 14:30").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-01 14:30:00");
/// assert!(parse_timestamp("not a date").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    parse_any_format(raw.trim())
        .filter(|ts| (MIN_YEAR..=MAX_YEAR).contains(&ts.year()))
        .ok_or_else(|| CampusError::TimestampParse(raw.to_string()))
}

fn parse_any_format(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a kWh reading, rejecting NaN and infinities.
pub fn parse_kwh(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CampusError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(CampusError::InvalidNumber(raw.to_string()));
    }
    Ok(value)
}

/// The Sunday that closes the week containing `date`.
///
/// Weekly buckets are labelled by this date. Saturates at
/// [`NaiveDate::MAX`] when that Sunday is not representable.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_until_sunday = 6 - date.weekday().num_days_from_monday() as i64;
    date.checked_add_signed(Duration::days(days_until_sunday))
        .unwrap_or(NaiveDate::MAX)
}

/// Format a timestamp the way the report and exports print it.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `true` when `date` is a Sunday.
pub fn is_week_end(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_timestamp_space_separated() {
        let ts = parse_timestamp("2024-01-15 08:45:10").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15 08:45:10");
    }

    #[test]
    fn test_parse_timestamp_without_seconds() {
        let ts = parse_timestamp("2024-01-15 08:45").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15 08:45:00");
    }

    #[test]
    fn test_parse_timestamp_iso_t_separator() {
        let ts = parse_timestamp("2024-01-15T08:45:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15 08:45:00");
    }

    #[test]
    fn test_parse_timestamp_rfc3339_converted_to_utc() {
        let ts = parse_timestamp("2024-01-15T10:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15 08:00:00");

        let zulu = parse_timestamp("2024-01-15T10:00:00Z").unwrap();
        assert_eq!(format_timestamp(&zulu), "2024-01-15 10:00:00");
    }

    #[test]
    fn test_parse_timestamp_slash_formats() {
        let ymd = parse_timestamp("2024/01/15 08:45").unwrap();
        let mdy = parse_timestamp("01/15/2024 08:45").unwrap();
        assert_eq!(ymd, mdy);
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        let ts = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15 00:00:00");
    }

    #[test]
    fn test_parse_timestamp_trims_whitespace() {
        assert!(parse_timestamp("  2024-01-15 08:45  ").is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("tomorrow").is_err());
        assert!(parse_timestamp("2024-13-45 10:00").is_err());
    }

    #[test]
    fn test_parse_kwh() {
        assert_eq!(parse_kwh("12.5").unwrap(), 12.5);
        assert_eq!(parse_kwh(" 3 ").unwrap(), 3.0);
        assert!(parse_kwh("abc").is_err());
        assert!(parse_kwh("").is_err());
        assert!(parse_kwh("NaN").is_err());
        assert!(parse_kwh("inf").is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_out_of_range_years() {
        assert!(parse_timestamp("+262142-12-31 10:00").is_err());
        assert!(parse_timestamp("-0044-03-15 12:00").is_err());
        assert!(parse_timestamp("0001-01-01").is_err());
        assert!(parse_timestamp("9999-12-31 00:00").is_err());
        assert!(parse_timestamp("1500-06-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_parse_timestamp_year_bounds_inclusive() {
        assert_eq!(parse_timestamp("1677-12-31").unwrap().year(), MIN_YEAR);
        assert_eq!(parse_timestamp("2262-01-01 00:00").unwrap().year(), MAX_YEAR);
    }

    #[test]
    fn test_week_ending_saturates_at_max_date() {
        let near_max = NaiveDate::MAX.pred_opt().unwrap();
        assert_eq!(week_ending(NaiveDate::MAX), NaiveDate::MAX);
        assert!(week_ending(near_max) >= near_max);
    }

    #[test]
    fn test_week_ending_mid_week() {
        // 2024-01-10 is a Wednesday.
        assert_eq!(week_ending(date(2024, 1, 10)), date(2024, 1, 14));
    }

    #[test]
    fn test_week_ending_monday_and_sunday() {
        assert_eq!(week_ending(date(2024, 1, 8)), date(2024, 1, 14));
        assert_eq!(week_ending(date(2024, 1, 14)), date(2024, 1, 14));
        assert!(is_week_end(week_ending(date(2024, 2, 29))));
    }
}
