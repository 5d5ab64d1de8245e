use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Reformats a forecast date from `YYYY-MM-DD` into `"<Weekday> DD/MM"`,
/// e.g. `2025-05-15` becomes `Thursday 15/05`.
///
/// Anything that is not a real calendar date in that format is a
/// [`Error::ParseError`]; the caller decides whether that is fatal (the
/// orchestrator skips the one day and keeps going).
pub fn format_date(iso: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map_err(|_| Error::ParseError { date: iso.to_string() })?;

    Ok(date.format("%A %d/%m").to_string())
}
