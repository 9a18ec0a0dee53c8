//! Parsing and validation of query parameters.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::{DATE_FORMAT, Pagination, TimeRange};

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{4}-\d{2}-\d{2});(\d{4}-\d{2}-\d{2})\]$").expect("valid date range pattern")
});

/// Parse `[YYYY-MM-DD;YYYY-MM-DD]` into an inclusive range.
pub fn parse_date_range(raw: &str) -> Result<TimeRange, String> {
    let captures = DATE_RANGE
        .captures(raw)
        .ok_or_else(|| format!("date range \"{}\" has invalid format", raw))?;

    let start = NaiveDate::parse_from_str(&captures[1], DATE_FORMAT)
        .map_err(|_| format!("start date \"{}\" has invalid format", &captures[1]))?;
    let end = NaiveDate::parse_from_str(&captures[2], DATE_FORMAT)
        .map_err(|_| format!("end date \"{}\" has invalid format", &captures[2]))?;

    TimeRange::new(start, end).map_err(|e| e.to_string())
}

/// Convert a 1-based page number and page size into a [`Pagination`].
pub fn pagination(page: i64, per_page: i64) -> Result<Pagination, String> {
    if page < 1 {
        return Err("page value is less than 1".to_string());
    }
    if per_page < 0 {
        return Err("per page value is less than 0".to_string());
    }

    let page = u32::try_from(page - 1).map_err(|_| "page value is too large".to_string())?;
    let per_page =
        u32::try_from(per_page).map_err(|_| "per page value is too large".to_string())?;
    Ok(Pagination::new(page, per_page))
}
