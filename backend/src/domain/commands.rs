// backend/src/domain/commands.rs

//! Domain-level event types for the picker controller.
//! The host reads untyped `data-subject` / `data-value` attributes off the
//! event target; these types are the parsed form the controller works with.
//! Parsing failures surface as [`PickerError`] and the controller drops them.

use crate::error::{PickerError, PickerResult};

pub mod clicks {
    use super::*;
    use shared::{parse_year_key, CalendarDate, CalendarWeek, View, YearMonth};
    use std::str::FromStr;

    /// What a clicked element stands for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ClickSubject {
        Prev,
        Next,
        Title,
        Day,
        Week,
        Month,
        Year,
        Decade,
        Time1,
        Time2,
        TimeRange1,
        TimeRange2,
        ViewMonth,
    }

    impl ClickSubject {
        pub fn as_str(&self) -> &'static str {
            match self {
                ClickSubject::Prev => "prev",
                ClickSubject::Next => "next",
                ClickSubject::Title => "title",
                ClickSubject::Day => "day",
                ClickSubject::Week => "week",
                ClickSubject::Month => "month",
                ClickSubject::Year => "year",
                ClickSubject::Decade => "decade",
                ClickSubject::Time1 => "time1",
                ClickSubject::Time2 => "time2",
                ClickSubject::TimeRange1 => "timeRange1",
                ClickSubject::TimeRange2 => "timeRange2",
                ClickSubject::ViewMonth => "view-month",
            }
        }
    }

    impl FromStr for ClickSubject {
        type Err = PickerError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let subject = match s {
                "prev" => ClickSubject::Prev,
                "next" => ClickSubject::Next,
                "title" => ClickSubject::Title,
                "day" => ClickSubject::Day,
                "week" => ClickSubject::Week,
                "month" => ClickSubject::Month,
                "year" => ClickSubject::Year,
                "decade" => ClickSubject::Decade,
                "time1" => ClickSubject::Time1,
                "time2" => ClickSubject::Time2,
                "timeRange1" => ClickSubject::TimeRange1,
                "timeRange2" => ClickSubject::TimeRange2,
                "view-month" => ClickSubject::ViewMonth,
                _ => return Err(PickerError::UnknownSubject(s.to_string())),
            };
            Ok(subject)
        }
    }

    /// A click with its payload parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ClickCommand {
        Prev,
        Next,
        Title,
        Day(CalendarDate),
        Week(CalendarWeek),
        Month(YearMonth),
        Year(i32),
        /// First year of the clicked decade
        Decade(i32),
        ShowView(View),
    }

    impl ClickCommand {
        /// Parse a `data-subject` / `data-value` pair
        pub fn parse(subject: &str, value: &str) -> PickerResult<Self> {
            let value = value.trim();
            let command = match subject.parse::<ClickSubject>()? {
                ClickSubject::Prev => ClickCommand::Prev,
                ClickSubject::Next => ClickCommand::Next,
                ClickSubject::Title => ClickCommand::Title,
                ClickSubject::Day => ClickCommand::Day(value.parse()?),
                ClickSubject::Week => ClickCommand::Week(value.parse()?),
                ClickSubject::Month => ClickCommand::Month(value.parse()?),
                ClickSubject::Year => ClickCommand::Year(parse_year_key(value)?),
                ClickSubject::Decade => ClickCommand::Decade(parse_year_key(value)?),
                ClickSubject::Time1 => ClickCommand::ShowView(View::Time1),
                ClickSubject::Time2 => ClickCommand::ShowView(View::Time2),
                ClickSubject::TimeRange1 => ClickCommand::ShowView(View::TimeRange1),
                ClickSubject::TimeRange2 => ClickCommand::ShowView(View::TimeRange2),
                ClickSubject::ViewMonth => ClickCommand::ShowView(View::Month),
            };
            Ok(command)
        }
    }
}

pub mod inputs {
    use super::*;
    use std::str::FromStr;

    /// Time field driven by a slider or number input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum InputSubject {
        Hours,
        Minutes,
        /// End of a time range
        Hours2,
        Minutes2,
    }

    impl InputSubject {
        pub fn as_str(&self) -> &'static str {
            match self {
                InputSubject::Hours => "hours",
                InputSubject::Minutes => "minutes",
                InputSubject::Hours2 => "hours2",
                InputSubject::Minutes2 => "minutes2",
            }
        }

        pub fn max_value(&self) -> u32 {
            match self {
                InputSubject::Hours | InputSubject::Hours2 => 23,
                InputSubject::Minutes | InputSubject::Minutes2 => 59,
            }
        }

        pub fn is_end(&self) -> bool {
            matches!(self, InputSubject::Hours2 | InputSubject::Minutes2)
        }
    }

    impl FromStr for InputSubject {
        type Err = PickerError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "hours" => Ok(InputSubject::Hours),
                "minutes" => Ok(InputSubject::Minutes),
                "hours2" => Ok(InputSubject::Hours2),
                "minutes2" => Ok(InputSubject::Minutes2),
                _ => Err(PickerError::UnknownSubject(s.to_string())),
            }
        }
    }

    /// Input for setting one time field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SetTimeFieldCommand {
        pub subject: InputSubject,
        pub value: u32,
    }

    impl SetTimeFieldCommand {
        pub fn parse(subject: &str, value: &str) -> PickerResult<Self> {
            let subject: InputSubject = subject.parse()?;
            let value: u32 = value.trim().parse().map_err(|_| PickerError::InvalidNumber {
                field: subject.as_str(),
                value: value.to_string(),
            })?;
            Self::new(subject, value)
        }

        pub fn new(subject: InputSubject, value: u32) -> PickerResult<Self> {
            if value > subject.max_value() {
                return Err(PickerError::TimeOutOfRange {
                    field: subject.as_str(),
                    value,
                });
            }
            Ok(Self { subject, value })
        }
    }
}

pub use clicks::*;
pub use inputs::*;
