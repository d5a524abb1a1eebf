use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::core::{AppError, Result};

/// Smallest distinguishable step between two adjacent windows.
/// Window bounds are inclusive, so the previous window ends one tick
/// before the current one starts.
pub fn tick() -> Duration {
    Duration::milliseconds(1)
}

/// First instant (UTC midnight) of the given calendar month
pub fn start_of_month(year: i32, month: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::validation(format!("Invalid month {}-{:02}", year, month)))
}

/// Last instant (23:59:59.999) of the given calendar month
pub fn end_of_month(year: i32, month: u32) -> Result<DateTime<Utc>> {
    let (next_year, next_month) = next_month(year, month);
    Ok(start_of_month(next_year, next_month)? - tick())
}

/// Calendar month immediately before `(year, month)`
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Calendar month immediately after `(year, month)`
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// First and last instant of a whole calendar year
pub fn year_bounds(year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    Ok((start_of_month(year, 1)?, end_of_month(year, 12)?))
}

/// `(year, month)` of an instant in UTC
pub fn year_month(instant: DateTime<Utc>) -> (i32, u32) {
    (instant.year(), instant.month())
}

/// Parse an incoming date value.
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (UTC midnight).
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| {
            AppError::validation(format!(
                "Invalid date '{}'. Expected RFC 3339 or YYYY-MM-DD",
                value
            ))
        })
}

/// Format as `YYYY-MM-DD`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format an hour of day as `HH:00`, clamped to 0..=23
pub fn format_hour_label(hour: i64) -> String {
    format!("{:02}:00", hour.clamp(0, 23))
}

/// Format a calendar month as `Mon YYYY` (e.g. `May 2025`)
pub fn format_month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}
