//! Calendar sheet generation for the date picker.
//!
//! This module turns a navigation anchor plus display options into a
//! rendering-ready [`Sheet`]: the day grid of a month, the months of a year,
//! the years of a decade or the decades of a century. Sheets are pure
//! projections; nothing here keeps state between calls apart from the
//! locale formatter and the clock used to find "today".

use chrono::{Duration, NaiveDate};
use shared::{
    CalendarDate, NameStyle, Sheet, SheetItem, SheetNav, SheetSize, YearMonth, YearQuarter,
    MAX_YEAR,
};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::domain::calendar_utils::{
    century_start, day_count_of_month, decade_start, in_date_range, in_number_range,
    leading_day_count, normalize_month, row_week, weekday_index, year_key, MAX_NAVIGABLE_MONTH,
    MIN_NAVIGABLE_MONTH,
};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::locale::LocaleFormatter;

/// Inclusive selection range. A range whose start is after its end
/// highlights nothing; ranges are never reordered here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedRange<T> {
    pub start: T,
    pub end: T,
}

impl<T> SelectedRange<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

/// Options for [`CalendarService::get_month_sheet`]
#[derive(Debug, Clone)]
pub struct MonthSheetOptions {
    pub year: i32,
    /// 0-based; values outside `0..12` roll over into neighbouring years
    pub month: i32,
    pub sheet_size: SheetSize,
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    pub show_week_numbers: bool,
    pub highlight_current: bool,
    pub highlight_weekends: bool,
    pub disable_weekends: bool,
    /// Key every cell by its row's ISO week instead of its date
    pub select_weeks: bool,
    pub selected_range: Option<SelectedRange<CalendarDate>>,
    pub selected_keys: BTreeSet<String>,
}

impl MonthSheetOptions {
    pub fn new(year: i32, month: i32) -> Self {
        Self {
            year,
            month,
            sheet_size: SheetSize::Default,
            min_date: None,
            max_date: None,
            show_week_numbers: false,
            highlight_current: true,
            highlight_weekends: true,
            disable_weekends: false,
            select_weeks: false,
            selected_range: None,
            selected_keys: BTreeSet::new(),
        }
    }
}

/// Options for [`CalendarService::get_year_sheet`]
#[derive(Debug, Clone)]
pub struct YearSheetOptions {
    pub year: i32,
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    pub highlight_current: bool,
    /// Key month cells by their quarter
    pub select_quarters: bool,
    pub selected_range: Option<SelectedRange<YearMonth>>,
    pub selected_keys: BTreeSet<String>,
}

impl YearSheetOptions {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            min_date: None,
            max_date: None,
            highlight_current: true,
            select_quarters: false,
            selected_range: None,
            selected_keys: BTreeSet::new(),
        }
    }
}

/// Options for [`CalendarService::get_decade_sheet`] and
/// [`CalendarService::get_century_sheet`]
#[derive(Debug, Clone)]
pub struct YearSpanSheetOptions {
    pub year: i32,
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    pub highlight_current: bool,
    pub selected_range: Option<SelectedRange<i32>>,
    pub selected_keys: BTreeSet<String>,
}

impl YearSpanSheetOptions {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            min_date: None,
            max_date: None,
            highlight_current: true,
            selected_range: None,
            selected_keys: BTreeSet::new(),
        }
    }
}

/// Range membership of one linear value: (in range, first, last)
fn range_flags(value: i64, range: Option<(i64, i64)>) -> (bool, bool, bool) {
    match range {
        Some((start, end)) if start <= end && start <= value && value <= end => {
            (true, value == start, value == end)
        }
        _ => (false, false, false),
    }
}

/// Range membership of a span of years (a decade cell)
fn span_range_flags(first: i64, last: i64, range: Option<(i64, i64)>) -> (bool, bool, bool) {
    match range {
        Some((start, end)) if start <= end && first <= end && last >= start => (
            true,
            (first..=last).contains(&start),
            (first..=last).contains(&end),
        ),
        _ => (false, false, false),
    }
}

/// Whether navigating back to a period ending at `last_month` is blocked
fn previous_blocked(last_month: i64, min_month: Option<i64>) -> bool {
    last_month <= MIN_NAVIGABLE_MONTH || min_month.map_or(false, |min| last_month < min)
}

/// Whether navigating forward to a period starting at `first_month` is blocked
fn next_blocked(first_month: i64, max_month: Option<i64>) -> bool {
    first_month > MAX_NAVIGABLE_MONTH || max_month.map_or(false, |max| first_month > max)
}

fn linear_month(date: &Option<CalendarDate>) -> Option<i64> {
    date.as_ref().map(|d| d.year_month().linear())
}

fn bound_year(date: &Option<CalendarDate>) -> Option<i64> {
    date.as_ref().map(|d| d.year as i64)
}

/// Calendar service that produces sheets for every drill level
#[derive(Clone)]
pub struct CalendarService {
    locale: LocaleFormatter,
    clock: Rc<dyn Clock>,
}

impl CalendarService {
    /// Create a new CalendarService reading today from the system clock
    pub fn new(locale: LocaleFormatter) -> Self {
        Self::with_clock(locale, Rc::new(SystemClock::new()))
    }

    pub fn with_clock(locale: LocaleFormatter, clock: Rc<dyn Clock>) -> Self {
        Self { locale, clock }
    }

    pub fn locale(&self) -> &LocaleFormatter {
        &self.locale
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Day grid of one month, padded with adjacent-month days to whole weeks
    pub fn get_month_sheet(&self, options: &MonthSheetOptions) -> Sheet {
        let anchor = normalize_month(options.year, options.month);
        let first_day_of_week = self.locale.get_first_day_of_week();
        let weekend_days = self.locale.get_weekend_days();
        let today = self.clock.today();

        let previous = YearMonth::from_linear(anchor.linear() - 1);
        let next = YearMonth::from_linear(anchor.linear() + 1);
        let previous_nav = SheetNav {
            year: previous.year,
            month: previous.month,
            disabled: previous_blocked(previous.linear(), linear_month(&options.min_date)),
        };
        let next_nav = SheetNav {
            year: next.year,
            month: next.month,
            disabled: next_blocked(next.linear(), linear_month(&options.max_date)),
        };

        let name = self.locale.format_month_year(anchor.year, anchor.month);
        let first_of_month = match NaiveDate::from_ymd_opt(anchor.year, anchor.month + 1, 1) {
            Some(date) => date,
            None => {
                warn!("🗓️ Month {} is outside the supported calendar range", anchor);
                return Sheet {
                    name,
                    previous: previous_nav,
                    next: next_nav,
                    column_count: 7,
                    highlighted_columns: Vec::new(),
                    column_names: Vec::new(),
                    row_names: Vec::new(),
                    items: Vec::new(),
                };
            }
        };

        let leading = leading_day_count(weekday_index(first_of_month), first_day_of_week);
        let days = day_count_of_month(anchor.year, anchor.month as i32);
        let minimum = (leading + days + 6) / 7 * 7;
        let cell_count = match options.sheet_size {
            SheetSize::Maximal => 42,
            SheetSize::Default => minimum.max(35),
            SheetSize::Minimal => minimum,
        };
        let grid_start = first_of_month - Duration::days(leading as i64);

        let selected_range = options
            .selected_range
            .map(|range| (range.start.ordinal_value(), range.end.ordinal_value()));

        let mut items = Vec::with_capacity(cell_count as usize);
        for index in 0..cell_count {
            let Some(naive) = grid_start.checked_add_signed(Duration::days(index as i64)) else {
                continue;
            };
            let date = CalendarDate::from_naive(naive);
            let weekend = weekend_days.contains(&weekday_index(naive));
            let out_of_range = date.year > MAX_YEAR
                || !in_date_range(&date, options.min_date.as_ref(), options.max_date.as_ref());
            let week = options.select_weeks.then(|| row_week(naive, first_day_of_week));
            let selection_key = match &week {
                Some(week) => week.key(),
                None => date.key(),
            };
            let (in_range, first, last) = range_flags(date.ordinal_value(), selected_range);

            items.push(SheetItem {
                year: date.year,
                month: Some(date.month),
                day: Some(date.day),
                week,
                name: date.day.to_string(),
                selected: options.selected_keys.contains(&selection_key),
                selection_key,
                current: options.highlight_current && date == today,
                highlighted: options.highlight_weekends && weekend,
                adjacent: date.year_month() != anchor,
                disabled: out_of_range || (options.disable_weekends && weekend),
                out_of_min_max_range: out_of_range,
                in_selected_range: in_range,
                first_in_selected_range: first,
                last_in_selected_range: last,
            });
        }

        let row_names = if options.show_week_numbers {
            (0..cell_count / 7)
                .filter_map(|row| grid_start.checked_add_signed(Duration::days(row as i64 * 7)))
                .map(|row_start| {
                    let week = row_week(row_start, first_day_of_week);
                    self.locale.format_week_number(week.week)
                })
                .collect()
        } else {
            Vec::new()
        };

        let highlighted_columns = if options.highlight_weekends {
            (0..7usize)
                .filter(|column| {
                    weekend_days.contains(&((*column as u32 + first_day_of_week) % 7))
                })
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            "🗓️ Month sheet {} with {} cells ({} leading, first day of week {})",
            anchor,
            items.len(),
            leading,
            first_day_of_week
        );

        Sheet {
            name,
            previous: previous_nav,
            next: next_nav,
            column_count: 7,
            highlighted_columns,
            column_names: self.locale.get_weekday_names(NameStyle::Short, true),
            row_names,
            items,
        }
    }

    /// The twelve months of a year, three per row (one quarter per row)
    pub fn get_year_sheet(&self, options: &YearSheetOptions) -> Sheet {
        let year = options.year;
        let today = self.clock.today().year_month();
        let min_month = linear_month(&options.min_date);
        let max_month = linear_month(&options.max_date);
        let selected_range = options
            .selected_range
            .map(|range| (range.start.linear(), range.end.linear()));

        let items = (0..12)
            .map(|month| {
                let year_month = YearMonth::new(year, month);
                let linear = year_month.linear();
                let out_of_range =
                    linear > MAX_NAVIGABLE_MONTH || !in_number_range(linear, min_month, max_month);
                let selection_key = if options.select_quarters {
                    YearQuarter::from(year_month).key()
                } else {
                    year_month.key()
                };
                let (in_range, first, last) = range_flags(linear, selected_range);

                SheetItem {
                    year,
                    month: Some(month),
                    day: None,
                    week: None,
                    name: self.locale.get_month_name(month, NameStyle::Short),
                    selected: options.selected_keys.contains(&selection_key),
                    selection_key,
                    current: options.highlight_current && year_month == today,
                    highlighted: false,
                    adjacent: false,
                    disabled: out_of_range,
                    out_of_min_max_range: out_of_range,
                    in_selected_range: in_range,
                    first_in_selected_range: first,
                    last_in_selected_range: last,
                }
            })
            .collect();

        let row_names = if options.select_quarters {
            (1..=4).map(|quarter| format!("Q{}", quarter)).collect()
        } else {
            Vec::new()
        };

        debug!("🗓️ Year sheet {}", year);

        Sheet {
            name: self.locale.format_year(year),
            previous: SheetNav {
                year: year - 1,
                month: 0,
                disabled: previous_blocked(YearMonth::new(year - 1, 11).linear(), min_month),
            },
            next: SheetNav {
                year: year + 1,
                month: 0,
                disabled: next_blocked(YearMonth::new(year + 1, 0).linear(), max_month),
            },
            column_count: 3,
            highlighted_columns: Vec::new(),
            column_names: Vec::new(),
            row_names,
            items,
        }
    }

    /// The ten years of a decade plus one adjacent year on each side
    pub fn get_decade_sheet(&self, options: &YearSpanSheetOptions) -> Sheet {
        let start = decade_start(options.year);
        let today = self.clock.today();
        let min_year = bound_year(&options.min_date);
        let max_year = bound_year(&options.max_date);
        let selected_range = options
            .selected_range
            .map(|range| (range.start as i64, range.end as i64));

        let items = (start - 1..=start + 10)
            .map(|year| {
                let out_of_range =
                    year > MAX_YEAR || !in_number_range(year as i64, min_year, max_year);
                let selection_key = year_key(year);
                let (in_range, first, last) = range_flags(year as i64, selected_range);

                SheetItem {
                    year,
                    month: None,
                    day: None,
                    week: None,
                    name: self.locale.format_year(year),
                    selected: options.selected_keys.contains(&selection_key),
                    selection_key,
                    current: options.highlight_current && year == today.year,
                    highlighted: false,
                    adjacent: year < start || year > start + 9,
                    disabled: out_of_range,
                    out_of_min_max_range: out_of_range,
                    in_selected_range: in_range,
                    first_in_selected_range: first,
                    last_in_selected_range: last,
                }
            })
            .collect();

        debug!("🗓️ Decade sheet {}", start);

        Sheet {
            name: self.locale.format_decade(start),
            previous: SheetNav {
                year: start - 10,
                month: 0,
                disabled: previous_blocked(
                    YearMonth::new(start - 1, 11).linear(),
                    linear_month(&options.min_date),
                ),
            },
            next: SheetNav {
                year: start + 10,
                month: 0,
                disabled: next_blocked(
                    YearMonth::new(start + 10, 0).linear(),
                    linear_month(&options.max_date),
                ),
            },
            column_count: 4,
            highlighted_columns: Vec::new(),
            column_names: Vec::new(),
            row_names: Vec::new(),
            items,
        }
    }

    /// The ten decades of a century plus one adjacent decade on each side.
    /// Decade cells are for drilling down only and are never selected.
    pub fn get_century_sheet(&self, options: &YearSpanSheetOptions) -> Sheet {
        let start = century_start(options.year);
        let today = self.clock.today();
        let min_year = bound_year(&options.min_date);
        let max_year = bound_year(&options.max_date);
        let selected_range = options
            .selected_range
            .map(|range| (range.start as i64, range.end as i64));

        let items = (0..12)
            .map(|index| {
                let decade = start - 10 + index * 10;
                let first_year = decade as i64;
                let last_year = first_year + 9;
                let out_of_range = first_year > MAX_YEAR as i64
                    || min_year.map_or(false, |min| last_year < min)
                    || max_year.map_or(false, |max| first_year > max);
                let (in_range, first, last) =
                    span_range_flags(first_year, last_year, selected_range);

                SheetItem {
                    year: decade,
                    month: None,
                    day: None,
                    week: None,
                    name: self.locale.format_decade(decade),
                    selection_key: year_key(decade),
                    selected: false,
                    current: options.highlight_current
                        && (first_year..=last_year).contains(&(today.year as i64)),
                    highlighted: false,
                    adjacent: index == 0 || index == 11,
                    disabled: out_of_range,
                    out_of_min_max_range: out_of_range,
                    in_selected_range: in_range,
                    first_in_selected_range: first,
                    last_in_selected_range: last,
                }
            })
            .collect();

        debug!("🗓️ Century sheet {}", start);

        Sheet {
            name: self.locale.format_century(start),
            previous: SheetNav {
                year: start - 100,
                month: 0,
                disabled: previous_blocked(
                    YearMonth::new(start - 1, 11).linear(),
                    linear_month(&options.min_date),
                ),
            },
            next: SheetNav {
                year: start + 100,
                month: 0,
                disabled: next_blocked(
                    YearMonth::new(start + 100, 0).linear(),
                    linear_month(&options.max_date),
                ),
            },
            column_count: 4,
            highlighted_columns: Vec::new(),
            column_names: Vec::new(),
            row_names: Vec::new(),
            items,
        }
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new(LocaleFormatter::default())
    }
}
