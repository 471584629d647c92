//! The picker's external value string.
//!
//! | mode family            | value                          |
//! |------------------------|--------------------------------|
//! | single                 | `KEY`                          |
//! | multi                  | `KEY1,KEY2,...` (sorted)       |
//! | range                  | `KEY1|KEY2` (sorted)           |
//! | `time`                 | `HH:MM`                        |
//! | `timeRange`            | `HH:MM|HH:MM`                  |
//! | `dateTime`             | `YYYY-MM-DDTHH:MM`             |
//! | `dateTimeRange`        | `DATE1THH:MM|DATE2THH:MM`      |
//!
//! Keys live in a `BTreeSet`, so they come out sorted and, being zero-padded,
//! chronological. A `dateTimeRange` within one day repeats the date
//! (`DATETHH:MM|DATETHH:MM`) so both times survive.

use chrono::{NaiveDate, Weekday};
use shared::{
    parse_year_key, CalendarDate, CalendarTime, CalendarWeek, Cardinality, Granularity,
    SelectionMode, YearMonth, YearQuarter,
};
use std::collections::BTreeSet;

use crate::domain::calendar_utils::year_key;
use crate::error::{PickerError, PickerResult};

const MULTI_SEPARATOR: char = ',';
const RANGE_SEPARATOR: char = '|';
const TIME_SEPARATOR: char = 'T';

/// Selection state decoded from a value string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedValue {
    pub keys: BTreeSet<String>,
    pub start_time: Option<CalendarTime>,
    pub end_time: Option<CalendarTime>,
}

/// Serialize the selection for `mode`
pub fn encode_value(
    mode: SelectionMode,
    keys: &BTreeSet<String>,
    start_time: CalendarTime,
    end_time: CalendarTime,
) -> String {
    match mode {
        SelectionMode::Time => start_time.key(),
        SelectionMode::TimeRange => format!("{}{}{}", start_time, RANGE_SEPARATOR, end_time),
        SelectionMode::DateTime => keys
            .iter()
            .next()
            .map(|key| format!("{}{}{}", key, TIME_SEPARATOR, start_time))
            .unwrap_or_default(),
        SelectionMode::DateTimeRange => match (keys.iter().next(), keys.iter().next_back()) {
            (Some(first), Some(last)) => format!(
                "{}{}{}{}{}{}{}",
                first, TIME_SEPARATOR, start_time, RANGE_SEPARATOR, last, TIME_SEPARATOR, end_time
            ),
            _ => String::new(),
        },
        _ => match mode.cardinality() {
            Cardinality::Single => keys.iter().next().cloned().unwrap_or_default(),
            Cardinality::Multiple => join_keys(keys, MULTI_SEPARATOR),
            Cardinality::Range => join_keys(keys, RANGE_SEPARATOR),
        },
    }
}

fn join_keys(keys: &BTreeSet<String>, separator: char) -> String {
    keys.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Parse a value string for `mode`.
///
/// Whitespace around the value and around each token is ignored; an empty
/// value decodes to an empty selection. Every token must be a well-formed
/// key of the mode's granularity.
pub fn decode_value(mode: SelectionMode, value: &str) -> PickerResult<DecodedValue> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DecodedValue::default());
    }

    let invalid = || PickerError::InvalidValue {
        mode,
        value: value.to_string(),
    };

    match mode {
        SelectionMode::Time => Ok(DecodedValue {
            start_time: Some(value.parse()?),
            ..DecodedValue::default()
        }),
        SelectionMode::TimeRange => {
            let (start, end) = value.split_once(RANGE_SEPARATOR).ok_or_else(invalid)?;
            let start: CalendarTime = start.trim().parse()?;
            let end: CalendarTime = end.trim().parse()?;
            if start > end {
                return Err(invalid());
            }
            Ok(DecodedValue {
                keys: BTreeSet::new(),
                start_time: Some(start),
                end_time: Some(end),
            })
        }
        SelectionMode::DateTime => {
            let (date, time) = split_date_time(value)?;
            Ok(DecodedValue {
                keys: BTreeSet::from([date.key()]),
                start_time: Some(time),
                end_time: None,
            })
        }
        SelectionMode::DateTimeRange => {
            let tokens = split_tokens(value, RANGE_SEPARATOR);
            check_token_count(mode, tokens.len(), 2)?;
            let endpoints = tokens
                .iter()
                .map(|token| split_date_time(token))
                .collect::<PickerResult<Vec<_>>>()?;
            if endpoints.len() == 2 && endpoints[0] > endpoints[1] {
                return Err(invalid());
            }
            Ok(DecodedValue {
                keys: endpoints.iter().map(|(date, _)| date.key()).collect(),
                start_time: endpoints.first().map(|(_, time)| *time),
                end_time: endpoints.get(1).map(|(_, time)| *time),
            })
        }
        _ => {
            let tokens = match mode.cardinality() {
                Cardinality::Single => vec![value],
                Cardinality::Multiple => split_tokens(value, MULTI_SEPARATOR),
                Cardinality::Range => split_tokens(value, RANGE_SEPARATOR),
            };
            if mode.cardinality() == Cardinality::Range {
                check_token_count(mode, tokens.len(), 2)?;
            }
            let keys = tokens
                .into_iter()
                .map(|token| canonical_key(mode.granularity(), token))
                .collect::<PickerResult<BTreeSet<_>>>()?;
            Ok(DecodedValue {
                keys,
                start_time: None,
                end_time: None,
            })
        }
    }
}

fn split_tokens(value: &str, separator: char) -> Vec<&str> {
    value.split(separator).map(str::trim).collect()
}

fn check_token_count(mode: SelectionMode, got: usize, max: usize) -> PickerResult<()> {
    if got > max {
        return Err(PickerError::TooManyKeys { mode, max, got });
    }
    Ok(())
}

/// `YYYY-MM-DD[THH:MM]`, a missing time reads as midnight
fn split_date_time(token: &str) -> PickerResult<(CalendarDate, CalendarTime)> {
    match token.split_once(TIME_SEPARATOR) {
        Some((date, time)) => Ok((date.trim().parse()?, time.trim().parse()?)),
        None => Ok((token.trim().parse()?, CalendarTime::default())),
    }
}

/// Validate a key against a granularity and return its canonical spelling
pub fn canonical_key(granularity: Granularity, key: &str) -> PickerResult<String> {
    let key = key.trim();
    let canonical = match granularity {
        Granularity::Day => key.parse::<CalendarDate>()?.key(),
        Granularity::Week => key.parse::<CalendarWeek>()?.key(),
        Granularity::Month => key.parse::<YearMonth>()?.key(),
        Granularity::Quarter => key.parse::<YearQuarter>()?.key(),
        Granularity::Year => year_key(parse_year_key(key)?),
        Granularity::Time => key.parse::<CalendarTime>()?.key(),
    };
    Ok(canonical)
}

/// The month a selection key should bring into view
pub fn anchor_of_key(granularity: Granularity, key: &str) -> Option<YearMonth> {
    match granularity {
        Granularity::Day => key.parse::<CalendarDate>().ok().map(|d| d.year_month()),
        Granularity::Week => {
            let week = key.parse::<CalendarWeek>().ok()?;
            NaiveDate::from_isoywd_opt(week.year, week.week, Weekday::Thu)
                .map(|thursday| CalendarDate::from_naive(thursday).year_month())
        }
        Granularity::Month => key.parse::<YearMonth>().ok(),
        Granularity::Quarter => key.parse::<YearQuarter>().ok().map(|q| q.first_month()),
        Granularity::Year => parse_year_key(key).ok().map(|year| YearMonth::new(year, 0)),
        Granularity::Time => None,
    }
}
