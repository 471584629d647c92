//! Shared calendar data model for the date picker.
//!
//! Everything in here is plain data: the value types a picker selects, the
//! enumerations that steer selection and navigation, the rendering-ready
//! `Sheet` snapshot, and the picker configuration. The logic that produces
//! and mutates these lives in the backend crate.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing calendar keys and enumeration names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDateError {
    #[error("expected a YYYY-MM-DD date, got '{0}'")]
    InvalidDate(String),
    #[error("expected a HH:MM time, got '{0}'")]
    InvalidTime(String),
    #[error("expected a YYYY-Www week, got '{0}'")]
    InvalidWeek(String),
    #[error("expected a YYYY-MM month, got '{0}'")]
    InvalidMonth(String),
    #[error("expected a YYYY-Qn quarter, got '{0}'")]
    InvalidQuarter(String),
    #[error("expected a YYYY year, got '{0}'")]
    InvalidYear(String),
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Canonical selection key formatting.
///
/// Every component is zero-padded to a fixed width so that sorting keys as
/// strings sorts them chronologically. Months and quarters are 0-based on
/// input and 1-based in the key.
pub mod keys {
    pub fn day_key(year: i32, month: u32, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", year, month + 1, day)
    }

    pub fn month_key(year: i32, month: u32) -> String {
        format!("{:04}-{:02}", year, month + 1)
    }

    pub fn year_key(year: i32) -> String {
        format!("{:04}", year)
    }

    /// ISO week key, e.g. `2024-W05`
    pub fn week_key(year: i32, week: u32) -> String {
        format!("{:04}-W{:02}", year, week)
    }

    pub fn quarter_key(year: i32, quarter: u32) -> String {
        format!("{:04}-Q{}", year, quarter + 1)
    }

    pub fn time_key(hours: u32, minutes: u32) -> String {
        format!("{:02}:{:02}", hours, minutes)
    }
}

/// Parse a fixed-width run of ASCII digits
fn parse_digits<T: FromStr>(part: &str, min_len: usize, max_len: usize) -> Option<T> {
    if part.len() < min_len || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Last year that still fits a four-digit key
pub const MAX_YEAR: i32 = 9999;

fn parse_year(part: &str) -> Option<i32> {
    parse_digits(part, 4, 4)
}

/// A local wall-clock calendar date (proleptic Gregorian, no timezone).
///
/// `month` is 0-based to keep month arithmetic (`year * 12 + month`) free of
/// off-by-one corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
        }
    }

    /// Convert to a chrono date, `None` if the fields don't name a real day
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day)
    }

    /// Integer that orders dates chronologically without any timezone math
    pub fn ordinal_value(&self) -> i64 {
        self.year as i64 * 10_000 + self.month as i64 * 100 + self.day as i64
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    pub fn key(&self) -> String {
        keys::day_key(self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDateError::InvalidDate(s.to_string());
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let year = parse_year(parts[0]).ok_or_else(invalid)?;
        let month: u32 = parse_digits(parts[1], 2, 2).ok_or_else(invalid)?;
        let day: u32 = parse_digits(parts[2], 2, 2).ok_or_else(invalid)?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_naive)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ParseDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.key()
    }
}

/// Hours and minutes of a local wall-clock time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarTime {
    pub hours: u32,
    pub minutes: u32,
}

impl CalendarTime {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    pub fn key(&self) -> String {
        keys::time_key(self.hours, self.minutes)
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for CalendarTime {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDateError::InvalidTime(s.to_string());
        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        let hours: u32 = parse_digits(hours, 2, 2).ok_or_else(invalid)?;
        let minutes: u32 = parse_digits(minutes, 2, 2).ok_or_else(invalid)?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(Self { hours, minutes })
    }
}

impl TryFrom<String> for CalendarTime {
    type Error = ParseDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarTime> for String {
    fn from(time: CalendarTime) -> Self {
        time.key()
    }
}

/// An ISO-8601 calendar week (week-based year + week number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarWeek {
    pub year: i32,
    pub week: u32,
}

impl CalendarWeek {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    pub fn key(&self) -> String {
        keys::week_key(self.year, self.week)
    }
}

impl fmt::Display for CalendarWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for CalendarWeek {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDateError::InvalidWeek(s.to_string());
        let (year, week) = s.split_once("-W").ok_or_else(invalid)?;
        let year = parse_year(year).ok_or_else(invalid)?;
        let week: u32 = parse_digits(week, 2, 2).ok_or_else(invalid)?;
        // Week 53 only exists in long ISO years
        let last_week = NaiveDate::from_ymd_opt(year, 12, 28)
            .map(|d| d.iso_week().week())
            .ok_or_else(invalid)?;
        if week == 0 || week > last_week {
            return Err(invalid());
        }
        Ok(Self { year, week })
    }
}

/// A month of a specific year, `month` 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Months elapsed since year 0, the `year * 12 + month` linear index
    pub fn linear(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64
    }

    pub fn from_linear(linear: i64) -> Self {
        Self {
            year: linear.div_euclid(12) as i32,
            month: linear.rem_euclid(12) as u32,
        }
    }

    /// 0-based quarter this month falls in
    pub fn quarter(&self) -> u32 {
        self.month / 3
    }

    pub fn key(&self) -> String {
        keys::month_key(self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for YearMonth {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDateError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = parse_year(year).ok_or_else(invalid)?;
        let month: u32 = parse_digits(month, 2, 2).ok_or_else(invalid)?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self::new(year, month - 1))
    }
}

/// A quarter of a specific year, `quarter` 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearQuarter {
    pub year: i32,
    pub quarter: u32,
}

impl YearQuarter {
    pub fn new(year: i32, quarter: u32) -> Self {
        Self { year, quarter }
    }

    pub fn first_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.quarter * 3)
    }

    pub fn last_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.quarter * 3 + 2)
    }

    pub fn key(&self) -> String {
        keys::quarter_key(self.year, self.quarter)
    }
}

impl From<YearMonth> for YearQuarter {
    fn from(month: YearMonth) -> Self {
        Self::new(month.year, month.quarter())
    }
}

impl FromStr for YearQuarter {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDateError::InvalidQuarter(s.to_string());
        let (year, quarter) = s.split_once("-Q").ok_or_else(invalid)?;
        let year = parse_year(year).ok_or_else(invalid)?;
        let quarter: u32 = parse_digits(quarter, 1, 1).ok_or_else(invalid)?;
        if !(1..=4).contains(&quarter) {
            return Err(invalid());
        }
        Ok(Self::new(year, quarter - 1))
    }
}

/// Parse a bare `YYYY` year key
pub fn parse_year_key(s: &str) -> Result<i32, ParseDateError> {
    parse_year(s).ok_or_else(|| ParseDateError::InvalidYear(s.to_string()))
}

/// How many values a selection mode holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Multiple,
    Range,
}

/// What kind of period a selection key names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Time,
}

/// The policy governing what a picker selects and how many of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    Date,
    Dates,
    DateTime,
    DateRange,
    DateTimeRange,
    Time,
    TimeRange,
    Week,
    Weeks,
    Month,
    Months,
    MonthRange,
    Quarter,
    Quarters,
    QuarterRange,
    Year,
    Years,
    YearRange,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 18] = [
        SelectionMode::Date,
        SelectionMode::Dates,
        SelectionMode::DateTime,
        SelectionMode::DateRange,
        SelectionMode::DateTimeRange,
        SelectionMode::Time,
        SelectionMode::TimeRange,
        SelectionMode::Week,
        SelectionMode::Weeks,
        SelectionMode::Month,
        SelectionMode::Months,
        SelectionMode::MonthRange,
        SelectionMode::Quarter,
        SelectionMode::Quarters,
        SelectionMode::QuarterRange,
        SelectionMode::Year,
        SelectionMode::Years,
        SelectionMode::YearRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Date => "date",
            SelectionMode::Dates => "dates",
            SelectionMode::DateTime => "dateTime",
            SelectionMode::DateRange => "dateRange",
            SelectionMode::DateTimeRange => "dateTimeRange",
            SelectionMode::Time => "time",
            SelectionMode::TimeRange => "timeRange",
            SelectionMode::Week => "week",
            SelectionMode::Weeks => "weeks",
            SelectionMode::Month => "month",
            SelectionMode::Months => "months",
            SelectionMode::MonthRange => "monthRange",
            SelectionMode::Quarter => "quarter",
            SelectionMode::Quarters => "quarters",
            SelectionMode::QuarterRange => "quarterRange",
            SelectionMode::Year => "year",
            SelectionMode::Years => "years",
            SelectionMode::YearRange => "yearRange",
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            SelectionMode::Dates
            | SelectionMode::Weeks
            | SelectionMode::Months
            | SelectionMode::Quarters
            | SelectionMode::Years => Cardinality::Multiple,
            SelectionMode::DateRange
            | SelectionMode::DateTimeRange
            | SelectionMode::TimeRange
            | SelectionMode::MonthRange
            | SelectionMode::QuarterRange
            | SelectionMode::YearRange => Cardinality::Range,
            _ => Cardinality::Single,
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            SelectionMode::Date
            | SelectionMode::Dates
            | SelectionMode::DateTime
            | SelectionMode::DateRange
            | SelectionMode::DateTimeRange => Granularity::Day,
            SelectionMode::Time | SelectionMode::TimeRange => Granularity::Time,
            SelectionMode::Week | SelectionMode::Weeks => Granularity::Week,
            SelectionMode::Month | SelectionMode::Months | SelectionMode::MonthRange => {
                Granularity::Month
            }
            SelectionMode::Quarter | SelectionMode::Quarters | SelectionMode::QuarterRange => {
                Granularity::Quarter
            }
            SelectionMode::Year | SelectionMode::Years | SelectionMode::YearRange => {
                Granularity::Year
            }
        }
    }

    /// Whether the value carries a time of day next to (or instead of) a date
    pub fn has_time(&self) -> bool {
        matches!(
            self,
            SelectionMode::DateTime
                | SelectionMode::DateTimeRange
                | SelectionMode::Time
                | SelectionMode::TimeRange
        )
    }

    /// Whether the start/end times must be kept ordered
    pub fn is_time_range(&self) -> bool {
        matches!(self, SelectionMode::TimeRange | SelectionMode::DateTimeRange)
    }

    /// The view a picker opens on (and falls back to when the mode changes)
    pub fn initial_view(&self) -> View {
        match self.granularity() {
            Granularity::Year => View::Decade,
            Granularity::Month | Granularity::Quarter => View::Year,
            Granularity::Time if *self == SelectionMode::TimeRange => View::TimeRange1,
            Granularity::Time => View::Time1,
            Granularity::Day | Granularity::Week => View::Month,
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SelectionMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseDateError::UnknownVariant {
                kind: "selection mode",
                value: s.to_string(),
            })
    }
}

/// Which page of the picker is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Month,
    Year,
    Decade,
    Century,
    Time1,
    Time2,
    TimeRange1,
    TimeRange2,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Month => "month",
            View::Year => "year",
            View::Decade => "decade",
            View::Century => "century",
            View::Time1 => "time1",
            View::Time2 => "time2",
            View::TimeRange1 => "timeRange1",
            View::TimeRange2 => "timeRange2",
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(
            self,
            View::Time1 | View::Time2 | View::TimeRange1 | View::TimeRange2
        )
    }

    /// The next coarser calendar view, `None` at the top or in a time view
    pub fn drill_up(&self) -> Option<View> {
        match self {
            View::Month => Some(View::Year),
            View::Year => Some(View::Decade),
            View::Decade => Some(View::Century),
            _ => None,
        }
    }

    /// The next finer calendar view, `None` at the bottom or in a time view
    pub fn drill_down(&self) -> Option<View> {
        match self {
            View::Century => Some(View::Decade),
            View::Decade => Some(View::Year),
            View::Year => Some(View::Month),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let view = match s {
            "month" => View::Month,
            "year" => View::Year,
            "decade" => View::Decade,
            "century" => View::Century,
            "time1" => View::Time1,
            "time2" => View::Time2,
            "timeRange1" => View::TimeRange1,
            "timeRange2" => View::TimeRange2,
            _ => {
                return Err(ParseDateError::UnknownVariant {
                    kind: "view",
                    value: s.to_string(),
                })
            }
        };
        Ok(view)
    }
}

/// How many cells a month sheet shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetSize {
    /// Whole weeks only, at least five rows
    #[default]
    Default,
    /// Whole weeks only, as few rows as the month needs
    Minimal,
    /// Always six rows (42 cells)
    Maximal,
}

impl FromStr for SheetSize {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SheetSize::Default),
            "minimal" => Ok(SheetSize::Minimal),
            "maximal" => Ok(SheetSize::Maximal),
            _ => Err(ParseDateError::UnknownVariant {
                kind: "sheet size",
                value: s.to_string(),
            }),
        }
    }
}

/// Length of a month or weekday name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    #[default]
    Long,
    Short,
    Narrow,
}

/// Navigation target of a sheet's previous/next control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNav {
    pub year: i32,
    pub month: u32,
    pub disabled: bool,
}

/// One cell of a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetItem {
    pub year: i32,
    /// 0-based, `None` for year and decade cells
    pub month: Option<u32>,
    /// `None` for anything coarser than a day
    pub day: Option<u32>,
    /// Set on day cells of a week-selecting sheet
    pub week: Option<CalendarWeek>,
    pub name: String,
    /// Key the cell contributes to a selection (day, week, month, quarter or year key)
    pub selection_key: String,
    /// Today / this month / this year
    pub current: bool,
    /// Weekend emphasis
    pub highlighted: bool,
    /// Belongs to the neighbouring period, shown for layout continuity
    pub adjacent: bool,
    pub disabled: bool,
    pub out_of_min_max_range: bool,
    pub selected: bool,
    pub in_selected_range: bool,
    pub first_in_selected_range: bool,
    pub last_in_selected_range: bool,
}

impl SheetItem {
    /// The calendar date of a day cell
    pub fn date(&self) -> Option<CalendarDate> {
        match (self.month, self.day) {
            (Some(month), Some(day)) => Some(CalendarDate::new(self.year, month, day)),
            _ => None,
        }
    }
}

/// A rendering-ready grid of cells for one navigation anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub previous: SheetNav,
    pub next: SheetNav,
    pub column_count: usize,
    pub highlighted_columns: Vec<usize>,
    pub column_names: Vec<String>,
    pub row_names: Vec<String>,
    pub items: Vec<SheetItem>,
}

impl Sheet {
    pub fn rows(&self) -> impl Iterator<Item = &[SheetItem]> {
        self.items.chunks(self.column_count.max(1))
    }
}

/// Picker configuration, loadable from YAML or JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickerConfig {
    /// BCP 47 style tag, e.g. `en-US` or `de_DE`
    pub locale: String,
    pub sheet_size: SheetSize,
    pub show_week_numbers: bool,
    pub highlight_current: bool,
    pub highlight_weekends: bool,
    pub disable_weekends: bool,
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    /// Coalescing window for update requests and change notifications
    pub debounce_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            sheet_size: SheetSize::Default,
            show_week_numbers: false,
            highlight_current: true,
            highlight_weekends: true,
            disable_weekends: false,
            min_date: None,
            max_date: None,
            debounce_ms: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_keys_sort_chronologically() {
        let mut keys = vec![
            keys::day_key(2024, 10, 2),
            keys::day_key(2024, 1, 29),
            keys::day_key(999, 0, 1),
        ];
        keys.sort();
        assert_eq!(keys, vec!["0999-01-01", "2024-02-29", "2024-11-02"]);
    }

    #[test]
    fn test_parse_calendar_date() {
        let date: CalendarDate = "2024-03-15".parse().unwrap();
        assert_eq!(date, CalendarDate::new(2024, 2, 15));
        assert_eq!(date.key(), "2024-03-15");

        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        assert!("2024-3-15".parse::<CalendarDate>().is_err());
        assert!("not-a-date".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_years_past_9999_do_not_parse() {
        assert_eq!(parse_year_key("9999").unwrap(), MAX_YEAR);
        assert!(parse_year_key("10000").is_err());
        assert!("10000-01-01".parse::<CalendarDate>().is_err());
        assert!("10000-01".parse::<YearMonth>().is_err());
        assert!("10000-W01".parse::<CalendarWeek>().is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!("09:05".parse::<CalendarTime>().unwrap(), CalendarTime::new(9, 5));
        assert!("24:00".parse::<CalendarTime>().is_err());
        assert!("12:60".parse::<CalendarTime>().is_err());
        assert!("9:05".parse::<CalendarTime>().is_err());
    }

    #[test]
    fn test_parse_week_rejects_week_53_in_short_year() {
        assert_eq!("2020-W53".parse::<CalendarWeek>().unwrap(), CalendarWeek::new(2020, 53));
        assert!("2021-W53".parse::<CalendarWeek>().is_err());
        assert!("2021-W00".parse::<CalendarWeek>().is_err());
    }

    #[test]
    fn test_month_and_quarter_keys() {
        let month: YearMonth = "2024-05".parse().unwrap();
        assert_eq!(month, YearMonth::new(2024, 4));
        assert_eq!(YearQuarter::from(month).key(), "2024-Q2");

        let quarter: YearQuarter = "2024-Q4".parse().unwrap();
        assert_eq!(quarter.first_month(), YearMonth::new(2024, 9));
        assert_eq!(quarter.last_month(), YearMonth::new(2024, 11));
        assert!("2024-Q5".parse::<YearQuarter>().is_err());
    }

    #[test]
    fn test_year_month_linear_round_trip_for_negative_offsets() {
        let month = YearMonth::from_linear(2024 * 12 - 1);
        assert_eq!(month, YearMonth::new(2023, 11));
        assert_eq!(month.linear(), 2024 * 12 - 1);
    }

    #[test]
    fn test_selection_mode_names() {
        for mode in SelectionMode::ALL {
            assert_eq!(mode.as_str().parse::<SelectionMode>().unwrap(), mode);
        }
        assert!("fortnight".parse::<SelectionMode>().is_err());

        let json = serde_json::to_string(&SelectionMode::DateTimeRange).unwrap();
        assert_eq!(json, "\"dateTimeRange\"");
    }

    #[test]
    fn test_initial_views() {
        assert_eq!(SelectionMode::Year.initial_view(), View::Decade);
        assert_eq!(SelectionMode::YearRange.initial_view(), View::Decade);
        assert_eq!(SelectionMode::Months.initial_view(), View::Year);
        assert_eq!(SelectionMode::Quarter.initial_view(), View::Year);
        assert_eq!(SelectionMode::Time.initial_view(), View::Time1);
        assert_eq!(SelectionMode::TimeRange.initial_view(), View::TimeRange1);
        assert_eq!(SelectionMode::Weeks.initial_view(), View::Month);
        assert_eq!(SelectionMode::DateTimeRange.initial_view(), View::Month);
    }

    #[test]
    fn test_view_drilling() {
        assert_eq!(View::Month.drill_up(), Some(View::Year));
        assert_eq!(View::Century.drill_up(), None);
        assert_eq!(View::Time1.drill_up(), None);
        assert_eq!(View::Decade.drill_down(), Some(View::Year));
        assert_eq!(View::Month.drill_down(), None);
    }

    #[test]
    fn test_config_serializes_dates_as_keys() {
        let config = PickerConfig {
            min_date: Some(CalendarDate::new(2024, 0, 1)),
            ..PickerConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["min_date"], "2024-01-01");

        let parsed: PickerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, config);
    }
}
