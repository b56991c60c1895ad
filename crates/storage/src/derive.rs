//! Computed columns attached to every row at load time.

use chrono::{Datelike, Duration, NaiveDate};

/// Natural log of a death count. Non-positive and missing counts map to
/// `ln(1) = 0` so the derived column is defined for every row.
pub fn log_guard(count: Option<i64>) -> f64 {
    match count {
        Some(value) if value > 0 => (value as f64).ln(),
        _ => 0.0,
    }
}

/// Monday of the Monday-to-Sunday week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Maps a raw `Year` label onto one canonical year.
///
/// Plain years are kept as-is. Season labels such as `2019/2020` resolve to
/// the end date's year when it falls inside the span and to the last year of
/// the span otherwise. Anything unparseable falls back to the end date.
pub fn normalize_year(label: &str, end_date: NaiveDate) -> i32 {
    let label = label.trim();
    if let Ok(year) = label.parse::<i32>() {
        return year;
    }

    let span: Option<Vec<i32>> = label
        .split('/')
        .map(|part| part.trim().parse::<i32>().ok())
        .collect();
    match span.as_deref() {
        Some([first, .., last]) => {
            let (low, high) = if first <= last {
                (*first, *last)
            } else {
                (*last, *first)
            };
            let year = end_date.year();
            if (low..=high).contains(&year) {
                year
            } else {
                *last
            }
        }
        _ => end_date.year(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// `Ok(None)` for an empty cell; integral floats such as `12.0` are accepted
/// as long as they fit an `i64`.
pub(crate) fn parse_count(raw: &str) -> Result<Option<i64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Some(value));
    }
    match raw.parse::<f64>() {
        // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
        Ok(value)
            if value.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&value) =>
        {
            Ok(Some(value as i64))
        }
        _ => Err(()),
    }
}
