//! Pure date arithmetic shared by the sheet generator and the controller.
//!
//! Months are 0-based throughout. Functions taking a month accept values
//! outside `0..12` and carry them into the year through the
//! `year * 12 + month` linear index, so callers can step months without
//! writing their own carry logic.

use chrono::{Datelike, Duration, NaiveDate};
use shared::{CalendarDate, CalendarWeek, YearMonth, MAX_YEAR};

pub use shared::keys::{day_key, month_key, quarter_key, time_key, week_key, year_key};

/// Linear month index at or below which backwards navigation stops
/// (January of year 2).
pub const MIN_NAVIGABLE_MONTH: i64 = 24;

/// Linear month index past which forward navigation stops (December 9999).
/// Later years no longer have four-digit keys.
pub const MAX_NAVIGABLE_MONTH: i64 = MAX_YEAR as i64 * 12 + 11;

/// Fold an arbitrary month offset into a real year/month pair
pub fn normalize_month(year: i32, month: i32) -> YearMonth {
    YearMonth::from_linear(year as i64 * 12 + month as i64)
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a month, with out-of-range months normalized first
pub fn day_count_of_month(year: i32, month: i32) -> u32 {
    let normalized = normalize_month(year, month);
    match normalized.month {
        1 => {
            if is_leap_year(normalized.year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Inclusive date range test, a `None` bound leaves that side open
pub fn in_date_range(
    value: &CalendarDate,
    start: Option<&CalendarDate>,
    end: Option<&CalendarDate>,
) -> bool {
    let value = value.ordinal_value();
    in_number_range(
        value,
        start.map(CalendarDate::ordinal_value),
        end.map(CalendarDate::ordinal_value),
    )
}

/// Inclusive integer range test with the same open-bound convention
pub fn in_number_range(value: i64, start: Option<i64>, end: Option<i64>) -> bool {
    start.map_or(true, |start| value >= start) && end.map_or(true, |end| value <= end)
}

/// Weekday of a date, 0 = Sunday through 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Cells needed before the 1st so that it lands under its weekday column
pub fn leading_day_count(first_weekday: u32, first_day_of_week: u32) -> u32 {
    (first_weekday + 7 - first_day_of_week % 7) % 7
}

/// The Thursday of the displayed row a date sits in.
///
/// ISO weeks are defined by their Thursday, so keying a whole row by this
/// day keeps every cell of the row on the same week even when the locale
/// starts weeks on Sunday or Saturday.
pub fn row_thursday(date: NaiveDate, first_day_of_week: u32) -> NaiveDate {
    let offset_in_row = leading_day_count(weekday_index(date), first_day_of_week);
    let row_start = date - Duration::days(offset_in_row as i64);
    let thursday_offset = (4 + 7 - first_day_of_week % 7) % 7;
    row_start + Duration::days(thursday_offset as i64)
}

/// ISO week of the displayed row a date sits in
pub fn row_week(date: NaiveDate, first_day_of_week: u32) -> CalendarWeek {
    let iso = row_thursday(date, first_day_of_week).iso_week();
    CalendarWeek::new(iso.year(), iso.week())
}

/// Shift a date by a number of days, `None` if it leaves chrono's range
pub fn add_days(date: &CalendarDate, days: i64) -> Option<CalendarDate> {
    let naive = date.to_naive()?;
    naive
        .checked_add_signed(Duration::days(days))
        .map(CalendarDate::from_naive)
}

/// First year of the decade containing `year`
pub fn decade_start(year: i32) -> i32 {
    year - year.rem_euclid(10)
}

/// First year of the century containing `year`
pub fn century_start(year: i32) -> i32 {
    year - year.rem_euclid(100)
}
