//! Date keys and month-grid layout.
//!
//! # Invariants
//! - Date keys are `YYYY-MM-DD`, zero padded.
//! - A month grid always holds whole weeks (Sunday first) and lists every
//!   day of the anchor month exactly once.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

/// Column headers for a Sunday-first grid.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// `false` for padding days borrowed from adjacent months.
    pub is_current_month: bool,
}

/// Grid cell decorated for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date_key: String,
    pub day: u32,
    pub is_current_month: bool,
    pub event_count: usize,
}

/// Formats `date` as a `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses a `YYYY-MM-DD` key.
///
/// Parts may omit zero padding (`2024-3-5`). Returns `None` for anything
/// else, including out-of-range days such as `2024-02-30`.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let year = parse_part(parts.next()?)?;
    let month = parse_part(parts.next()?)?;
    let day = parse_part(parts.next()?)?;
    if parts.next().is_some() || year == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn parse_part(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    (28..=31)
        .rev()
        .find_map(|day| date.with_day(day))
        .unwrap_or(date)
}

/// First day of the month `delta` months away from `date`.
///
/// Saturates at the month of `date` when the result would leave chrono's range.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let start = start_of_month(date);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    };
    shifted.unwrap_or(start)
}

/// Builds the Sunday-first full-weeks grid for the month of `anchor`.
pub fn month_grid(anchor: NaiveDate) -> Vec<GridCell> {
    let start = start_of_month(anchor);
    let end = end_of_month(anchor);
    let leading = start.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity(42);

    let mut padding = Vec::with_capacity(leading as usize);
    let mut cursor = start;
    for _ in 0..leading {
        match cursor.pred_opt() {
            Some(prev) => {
                padding.push(prev);
                cursor = prev;
            }
            None => break,
        }
    }
    cells.extend(padding.into_iter().rev().map(|date| GridCell {
        date,
        is_current_month: false,
    }));

    cells.extend(start.iter_days().take_while(|day| *day <= end).map(|date| GridCell {
        date,
        is_current_month: true,
    }));

    let mut last = end;
    while cells.len() % 7 != 0 {
        let Some(next) = last.succ_opt() else {
            break;
        };
        cells.push(GridCell {
            date: next,
            is_current_month: false,
        });
        last = next;
    }

    cells
}

/// Month grid with per-day event counts looked up by date key.
pub fn month_grid_with_counts(
    anchor: NaiveDate,
    counts: &BTreeMap<String, usize>,
) -> Vec<CalendarDay> {
    month_grid(anchor)
        .into_iter()
        .map(|cell| {
            let key = date_key(cell.date);
            let event_count = counts.get(&key).copied().unwrap_or(0);
            CalendarDay {
                day: cell.date.day(),
                is_current_month: cell.is_current_month,
                event_count,
                date_key: key,
            }
        })
        .collect()
}

/// `"March 2024"` style heading.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// `"Mar 5"` style label for a date key; unparseable input is echoed back.
pub fn short_date_label(value: &str) -> String {
    match parse_date_key(value) {
        Some(date) => date.format("%b %-d").to_string(),
        None => value.to_string(),
    }
}
