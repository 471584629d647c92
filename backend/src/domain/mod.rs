//! # Domain Module
//!
//! Contains the date picker's calendar logic and selection state machine.
//!
//! Everything here is plain synchronous code with no knowledge of how the
//! picker is drawn. The rendering layer in [`crate::io`] consumes the sheets
//! and state produced here and feeds raw DOM events back in.
//!
//! ## Module Organization
//!
//! - **calendar_utils**: Month normalization, leap years, range checks, week rows
//! - **locale**: Locale-aware names, first day of week, weekend days, formatting
//! - **calendar**: Month/year/decade/century sheet generation
//! - **commands**: Parsed click and input events
//! - **value_codec**: The value string grammar, both directions
//! - **controller**: `DatePickerController`, the view and selection state machine
//! - **debouncer**: Idle/pending debouncer driven by an external clock
//! - **clock**: Injectable time source
//!
//! ## Core Concepts
//!
//! - **Sheet**: One grid of selectable periods for the current anchor
//! - **Selection key**: Zero-padded period string; sorting keys sorts periods
//! - **Anchor**: The year and month the visible page is built around
//! - **Selection mode**: Cardinality (single/multi/range) times granularity
//!
//! ## Rules
//!
//! - Months are 0-based everywhere inside the domain
//! - Reversed ranges highlight nothing; ranges are sorted when read, never when clicked
//! - Malformed events never change state
//! - Time ranges never serialize with the start after the end

pub mod calendar;
pub mod calendar_utils;
pub mod clock;
pub mod commands;
pub mod controller;
pub mod debouncer;
pub mod locale;
pub mod value_codec;

pub use calendar::{
    CalendarService, MonthSheetOptions, SelectedRange, YearSheetOptions, YearSpanSheetOptions,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use commands::{ClickCommand, ClickSubject, InputSubject, SetTimeFieldCommand};
pub use controller::{ControllerOptions, DatePickerController, PickerState};
pub use debouncer::{DebounceState, Debouncer};
pub use locale::{LocaleFormatter, LocaleSource};
