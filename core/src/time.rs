use chrono::{Datelike, NaiveDate};

use crate::error::DeadlineError;

/// Wire and display format for every date the tool touches.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date coming back from storage. History may legitimately be in the
/// past, so only the shape is checked.
pub fn parse_stored_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Validate a user-entered deadline: exactly `DD-MM-YYYY`, day in 1..=31,
/// month in 1..=12, year no earlier than the current one, and the triple must
/// exist on the calendar.
pub fn parse_deadline(input: &str, today: NaiveDate) -> Result<NaiveDate, DeadlineError> {
    let input = input.trim();
    if input.len() != 10 {
        return Err(DeadlineError::Format);
    }
    let shape_ok = input.chars().enumerate().all(|(i, c)| {
        if i == 2 || i == 5 {
            c == '-'
        } else {
            c.is_ascii_digit()
        }
    });
    if !shape_ok {
        return Err(DeadlineError::Format);
    }

    let day: u32 = input[0..2].parse().map_err(|_| DeadlineError::Format)?;
    let month: u32 = input[3..5].parse().map_err(|_| DeadlineError::Format)?;
    let year: i32 = input[6..10].parse().map_err(|_| DeadlineError::Format)?;

    if !(1..=31).contains(&day) {
        return Err(DeadlineError::DayRange);
    }
    if !(1..=12).contains(&month) {
        return Err(DeadlineError::MonthRange);
    }
    if year < today.year() {
        return Err(DeadlineError::PastYear);
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DeadlineError::NotACalendarDate)
}
