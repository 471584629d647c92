//! Selection and view state machine behind one date picker.
//!
//! The controller owns the navigation anchor, the active [`View`], the set of
//! selected keys and the two time fields. The host feeds it clicks and input
//! events (either typed or as raw `data-subject` / `data-value` strings),
//! asks it for the sheet to draw and reads the selection back through
//! [`DatePickerController::get_value`].
//!
//! The selection mode belongs to the host and may change between any two
//! calls. Every public method therefore starts with
//! [`DatePickerController::sync_selection_mode`], which clears the selection
//! and resets the view when the mode has moved.
//!
//! UI update requests and change notifications are debounced. Nothing fires
//! until the host calls [`DatePickerController::poll`] after the window has
//! passed, so a burst of mutations produces one callback of each kind.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use shared::{
    parse_year_key, CalendarDate, CalendarTime, CalendarWeek, Cardinality, Granularity,
    PickerConfig, SelectionMode, Sheet, View, YearMonth, YearQuarter, MAX_YEAR,
};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::{debug, info};

use crate::domain::calendar::{
    CalendarService, MonthSheetOptions, SelectedRange, YearSheetOptions, YearSpanSheetOptions,
};
use crate::domain::calendar_utils::{
    decade_start, in_date_range, in_number_range, row_week, weekday_index, year_key,
    MAX_NAVIGABLE_MONTH,
};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::commands::{ClickCommand, InputSubject, SetTimeFieldCommand};
use crate::domain::debouncer::Debouncer;
use crate::domain::locale::LocaleFormatter;
use crate::domain::value_codec::{anchor_of_key, decode_value, encode_value};
use crate::error::{PickerError, PickerResult};

/// Host callbacks a controller is built from
pub struct ControllerOptions {
    pub selection_mode: Box<dyn Fn() -> SelectionMode>,
    pub request_update: Box<dyn FnMut()>,
    pub on_change: Option<Box<dyn FnMut()>>,
}

impl ControllerOptions {
    pub fn new(
        selection_mode: impl Fn() -> SelectionMode + 'static,
        request_update: impl FnMut() + 'static,
    ) -> Self {
        Self {
            selection_mode: Box::new(selection_mode),
            request_update: Box::new(request_update),
            on_change: None,
        }
    }

    pub fn with_on_change(mut self, on_change: impl FnMut() + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }
}

/// Everything a renderer needs to draw the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerState {
    pub mode: SelectionMode,
    pub view: View,
    pub year: i32,
    pub month: u32,
    pub value: String,
    pub start_time: CalendarTime,
    pub end_time: CalendarTime,
    /// `None` in the time views
    pub sheet: Option<Sheet>,
}

pub struct DatePickerController {
    options: ControllerOptions,
    config: PickerConfig,
    calendar: CalendarService,
    clock: Rc<dyn Clock>,
    mode: SelectionMode,
    view: View,
    anchor: YearMonth,
    selection: BTreeSet<String>,
    start_time: CalendarTime,
    end_time: CalendarTime,
    update_debouncer: Debouncer,
    change_debouncer: Debouncer,
    destroyed: bool,
}

impl DatePickerController {
    /// Controller with default settings on the system clock
    pub fn new(options: ControllerOptions) -> Self {
        Self::with_config(options, PickerConfig::default(), Rc::new(SystemClock::new()))
    }

    pub fn with_config(options: ControllerOptions, config: PickerConfig, clock: Rc<dyn Clock>) -> Self {
        let locale = LocaleFormatter::new(config.locale.clone());
        let calendar = CalendarService::with_clock(locale, clock.clone());
        let mode = (options.selection_mode)();
        let anchor = clock.today().year_month();

        info!(
            "🗓️ Date picker created in {} mode, opening on {}",
            mode,
            mode.initial_view()
        );

        Self {
            update_debouncer: Debouncer::new(config.debounce_ms),
            change_debouncer: Debouncer::new(config.debounce_ms),
            options,
            config,
            calendar,
            clock,
            mode,
            view: mode.initial_view(),
            anchor,
            selection: BTreeSet::new(),
            start_time: CalendarTime::default(),
            end_time: CalendarTime::default(),
            destroyed: false,
        }
    }

    /// Replace the locale, e.g. with one bound to a supplier closure
    pub fn with_locale(mut self, locale: LocaleFormatter) -> Self {
        self.calendar = CalendarService::with_clock(locale, self.clock.clone());
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn locale(&self) -> &LocaleFormatter {
        self.calendar.locale()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Pick up a host-side mode change. A new mode clears the selection and
    /// moves to the mode's initial view. Returns the mode now in force.
    pub fn sync_selection_mode(&mut self) -> SelectionMode {
        let mode = (self.options.selection_mode)();
        if mode != self.mode {
            info!(
                "🗓️ Selection mode changed from {} to {}, clearing {} selected keys",
                self.mode,
                mode,
                self.selection.len()
            );
            self.mode = mode;
            self.selection.clear();
            self.view = mode.initial_view();
            self.schedule_update();
        }
        mode
    }

    /// Entry step of every public operation; `false` once destroyed
    fn enter(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.sync_selection_mode();
        true
    }

    pub fn mode(&mut self) -> SelectionMode {
        self.enter();
        self.mode
    }

    pub fn view(&mut self) -> View {
        self.enter();
        self.view
    }

    pub fn anchor(&mut self) -> YearMonth {
        self.enter();
        self.anchor
    }

    /// Selected keys in chronological order
    pub fn selection(&mut self) -> Vec<String> {
        self.enter();
        self.selection.iter().cloned().collect()
    }

    pub fn start_time(&mut self) -> CalendarTime {
        self.enter();
        self.start_time
    }

    pub fn end_time(&mut self) -> CalendarTime {
        self.enter();
        self.end_time
    }

    // ---- value ----

    pub fn get_value(&mut self) -> String {
        self.enter();
        encode_value(self.mode, &self.selection, self.start_time, self.end_time)
    }

    /// Replace the selection from a value string.
    ///
    /// Nothing changes when the value does not parse. A successful set moves
    /// the anchor to the earliest selected period and requests an update, but
    /// does not notify `on_change`.
    pub fn set_value(&mut self, value: &str) -> PickerResult<()> {
        if !self.enter() {
            return Err(PickerError::Destroyed);
        }

        let decoded = decode_value(self.mode, value)?;
        let cleared = decoded.keys.is_empty()
            && decoded.start_time.is_none()
            && decoded.end_time.is_none();

        if cleared && self.mode.has_time() {
            self.start_time = CalendarTime::default();
            self.end_time = CalendarTime::default();
        }
        if let Some(start) = decoded.start_time {
            self.start_time = start;
        }
        match decoded.end_time {
            Some(end) => self.end_time = end,
            None if self.mode.is_time_range() => self.end_time = self.end_time.max(self.start_time),
            None => {}
        }
        self.selection = decoded.keys;

        let granularity = self.mode.granularity();
        if let Some(anchor) = self
            .selection
            .iter()
            .next()
            .and_then(|key| anchor_of_key(granularity, key))
        {
            self.anchor = anchor;
        }

        info!(
            "🗓️ Value set to '{}' ({} keys) in {} mode",
            value.trim(),
            self.selection.len(),
            self.mode
        );
        self.schedule_update();
        Ok(())
    }

    // ---- raw DOM events ----

    /// Apply a click on an element carrying `data-subject` / `data-value`.
    /// Malformed attributes are ignored.
    pub fn handle_click(&mut self, subject: &str, value: &str) {
        if !self.enter() {
            return;
        }
        match ClickCommand::parse(subject, value) {
            Ok(command) => self.dispatch_click(command),
            Err(e) => debug!("🗓️ Ignoring click on '{}' ('{}'): {}", subject, value, e),
        }
    }

    /// Apply a slider or number input change. Malformed values are ignored.
    pub fn handle_input(&mut self, subject: &str, value: &str) {
        if !self.enter() {
            return;
        }
        match SetTimeFieldCommand::parse(subject, value) {
            Ok(command) => self.apply_time_field(command),
            Err(e) => debug!("🗓️ Ignoring input on '{}' ('{}'): {}", subject, value, e),
        }
    }

    fn dispatch_click(&mut self, command: ClickCommand) {
        match command {
            ClickCommand::Prev => self.step(-1),
            ClickCommand::Next => self.step(1),
            ClickCommand::Title => self.drill_up(),
            ClickCommand::Day(date) => self.select_day(date),
            ClickCommand::Week(week) => self.select_week(week),
            ClickCommand::Month(month) => self.select_month(month),
            ClickCommand::Year(year) => self.select_year(year),
            ClickCommand::Decade(start) => self.open_decade(start),
            ClickCommand::ShowView(view) => self.change_view(view),
        }
    }

    // ---- typed events ----

    pub fn click_prev(&mut self) {
        if self.enter() {
            self.step(-1);
        }
    }

    pub fn click_next(&mut self) {
        if self.enter() {
            self.step(1);
        }
    }

    pub fn click_title(&mut self) {
        if self.enter() {
            self.drill_up();
        }
    }

    pub fn click_day(&mut self, date: CalendarDate) {
        if self.enter() {
            self.select_day(date);
        }
    }

    pub fn click_week(&mut self, week: CalendarWeek) {
        if self.enter() {
            self.select_week(week);
        }
    }

    pub fn click_month(&mut self, month: YearMonth) {
        if self.enter() {
            self.select_month(month);
        }
    }

    pub fn click_year(&mut self, year: i32) {
        if self.enter() {
            self.select_year(year);
        }
    }

    pub fn click_decade(&mut self, start_year: i32) {
        if self.enter() {
            self.open_decade(start_year);
        }
    }

    pub fn show_view(&mut self, view: View) {
        if self.enter() {
            self.change_view(view);
        }
    }

    /// Jump straight to a page without touching the selection
    pub fn navigate_to(&mut self, anchor: YearMonth) {
        if self.enter() {
            self.anchor = YearMonth::from_linear(anchor.linear().min(MAX_NAVIGABLE_MONTH));
            debug!("🗓️ Jumped to {}", self.anchor);
            self.schedule_update();
        }
    }

    pub fn set_time_field(&mut self, subject: InputSubject, value: u32) {
        if !self.enter() {
            return;
        }
        match SetTimeFieldCommand::new(subject, value) {
            Ok(command) => self.apply_time_field(command),
            Err(e) => debug!("🗓️ Ignoring time input: {}", e),
        }
    }

    // ---- transitions ----

    /// Move the anchor one page back or forward unless the sheet's own
    /// navigation says that page is out of bounds
    fn step(&mut self, direction: i32) {
        let Some(sheet) = self.build_sheet() else {
            return;
        };
        let target = if direction < 0 { sheet.previous } else { sheet.next };
        if target.disabled {
            debug!("🗓️ Navigation blocked at {} in {} view", self.anchor, self.view);
            return;
        }
        self.anchor = match self.view {
            View::Month => YearMonth::new(target.year, target.month),
            _ => YearMonth::new(target.year, self.anchor.month),
        };
        debug!("🗓️ Navigated to {} in {} view", self.anchor, self.view);
        self.schedule_update();
    }

    fn drill_up(&mut self) {
        if let Some(view) = self.view.drill_up() {
            self.change_view(view);
        }
    }

    fn change_view(&mut self, view: View) {
        if view != self.view {
            info!("🗓️ View {} -> {}", self.view, view);
            self.view = view;
        }
        self.schedule_update();
    }

    fn select_day(&mut self, date: CalendarDate) {
        if !self.day_enabled(&date) {
            debug!("🗓️ Ignoring click on disabled day {}", date);
            return;
        }
        match self.mode.granularity() {
            Granularity::Day => {
                self.anchor = date.year_month();
                self.toggle(date.key());
            }
            Granularity::Week => {
                let Some(naive) = date.to_naive() else {
                    return;
                };
                let week = row_week(naive, self.locale().get_first_day_of_week());
                self.anchor = date.year_month();
                self.toggle(week.key());
            }
            _ => {
                self.anchor = date.year_month();
                self.schedule_update();
            }
        }
    }

    fn select_week(&mut self, week: CalendarWeek) {
        if self.mode.granularity() != Granularity::Week {
            debug!("🗓️ Week {} clicked outside a week mode", week);
            return;
        }
        if !self.week_enabled(week) {
            debug!("🗓️ Ignoring click on disabled week {}", week);
            return;
        }
        self.toggle(week.key());
    }

    fn select_month(&mut self, month: YearMonth) {
        if !self.month_enabled(month) {
            debug!("🗓️ Ignoring click on disabled month {}", month);
            return;
        }
        match self.mode.granularity() {
            Granularity::Month => {
                self.anchor = month;
                self.toggle(month.key());
            }
            Granularity::Quarter => {
                self.anchor = month;
                self.toggle(YearQuarter::from(month).key());
            }
            _ => {
                self.anchor = month;
                self.change_view(View::Month);
            }
        }
    }

    fn select_year(&mut self, year: i32) {
        if !self.year_enabled(year) {
            debug!("🗓️ Ignoring click on disabled year {}", year);
            return;
        }
        if self.mode.granularity() == Granularity::Year {
            self.anchor = YearMonth::new(year, self.anchor.month);
            self.toggle(year_key(year));
        } else {
            self.anchor = YearMonth::new(year, self.anchor.month);
            self.change_view(View::Year);
        }
    }

    fn open_decade(&mut self, start_year: i32) {
        let start_year = decade_start(start_year);
        if !self.decade_enabled(start_year) {
            debug!("🗓️ Ignoring click on disabled decade {}", start_year);
            return;
        }
        self.anchor = YearMonth::new(start_year, self.anchor.month);
        self.change_view(View::Decade);
    }

    // ---- bounds, matching the sheet's disabled cells ----

    fn day_enabled(&self, date: &CalendarDate) -> bool {
        let Some(naive) = date.to_naive() else {
            return false;
        };
        let in_bounds = date.year <= MAX_YEAR
            && in_date_range(date, self.config.min_date.as_ref(), self.config.max_date.as_ref());
        let blocked_weekend = self.config.disable_weekends
            && self.locale().get_weekend_days().contains(&weekday_index(naive));
        in_bounds && !blocked_weekend
    }

    /// A week stays clickable while any of its days is inside min/max
    fn week_enabled(&self, week: CalendarWeek) -> bool {
        let day = |weekday| {
            NaiveDate::from_isoywd_opt(week.year, week.week, weekday).map(CalendarDate::from_naive)
        };
        let (Some(monday), Some(sunday)) = (day(Weekday::Mon), day(Weekday::Sun)) else {
            return false;
        };
        monday.year <= MAX_YEAR
            && self.config.min_date.map_or(true, |min| sunday >= min)
            && self.config.max_date.map_or(true, |max| monday <= max)
    }

    fn month_enabled(&self, month: YearMonth) -> bool {
        let bound = |date: Option<CalendarDate>| date.map(|d| d.year_month().linear());
        month.linear() <= MAX_NAVIGABLE_MONTH
            && in_number_range(
                month.linear(),
                bound(self.config.min_date),
                bound(self.config.max_date),
            )
    }

    fn year_enabled(&self, year: i32) -> bool {
        let bound = |date: Option<CalendarDate>| date.map(|d| d.year as i64);
        year <= MAX_YEAR
            && in_number_range(year as i64, bound(self.config.min_date), bound(self.config.max_date))
    }

    fn decade_enabled(&self, start_year: i32) -> bool {
        start_year <= MAX_YEAR
            && self.config.min_date.map_or(true, |min| start_year + 9 >= min.year)
            && self.config.max_date.map_or(true, |max| start_year <= max.year)
    }

    /// Apply one click on a selectable key according to the mode's cardinality
    fn toggle(&mut self, key: String) {
        match self.mode.cardinality() {
            Cardinality::Single => {
                self.selection.clear();
                self.selection.insert(key);
            }
            Cardinality::Multiple => {
                if !self.selection.remove(&key) {
                    self.selection.insert(key);
                }
            }
            Cardinality::Range => {
                if !self.selection.remove(&key) {
                    if self.selection.len() >= 2 {
                        self.selection.clear();
                    }
                    self.selection.insert(key);
                }
            }
        }
        debug!("🗓️ Selection is now {:?}", self.selection);
        self.schedule_change();
    }

    fn apply_time_field(&mut self, command: SetTimeFieldCommand) {
        if !self.mode.has_time() {
            debug!("🗓️ Ignoring {} outside a time mode", command.subject.as_str());
            return;
        }

        let is_end = command.subject.is_end();
        let field = if is_end {
            &mut self.end_time
        } else {
            &mut self.start_time
        };
        match command.subject {
            InputSubject::Hours | InputSubject::Hours2 => field.hours = command.value,
            InputSubject::Minutes | InputSubject::Minutes2 => field.minutes = command.value,
        }

        // A date-time range spanning two days may end earlier in the day
        let clamp = match self.mode {
            SelectionMode::TimeRange => true,
            SelectionMode::DateTimeRange => self.selection.len() < 2,
            _ => false,
        };
        if clamp && self.start_time > self.end_time {
            if is_end {
                self.start_time = self.end_time;
            } else {
                self.end_time = self.start_time;
            }
        }

        self.schedule_change();
    }

    // ---- sheets ----

    /// The sheet for the active view, `None` in the time views
    pub fn current_sheet(&mut self) -> Option<Sheet> {
        self.enter();
        self.build_sheet()
    }

    /// Snapshot of everything the active view shows
    pub fn state(&mut self) -> PickerState {
        self.enter();
        PickerState {
            mode: self.mode,
            view: self.view,
            year: self.anchor.year,
            month: self.anchor.month,
            value: encode_value(self.mode, &self.selection, self.start_time, self.end_time),
            start_time: self.start_time,
            end_time: self.end_time,
            sheet: self.build_sheet(),
        }
    }

    fn build_sheet(&self) -> Option<Sheet> {
        let config = &self.config;
        let granularity = self.mode.granularity();
        let sheet = match self.view {
            View::Month => {
                let options = MonthSheetOptions {
                    sheet_size: config.sheet_size,
                    min_date: config.min_date,
                    max_date: config.max_date,
                    show_week_numbers: config.show_week_numbers,
                    highlight_current: config.highlight_current,
                    highlight_weekends: config.highlight_weekends,
                    disable_weekends: config.disable_weekends,
                    select_weeks: granularity == Granularity::Week,
                    selected_range: self.day_range(),
                    selected_keys: self.selection.clone(),
                    ..MonthSheetOptions::new(self.anchor.year, self.anchor.month as i32)
                };
                self.calendar.get_month_sheet(&options)
            }
            View::Year => {
                let options = YearSheetOptions {
                    min_date: config.min_date,
                    max_date: config.max_date,
                    highlight_current: config.highlight_current,
                    select_quarters: granularity == Granularity::Quarter,
                    selected_range: self.month_range(),
                    selected_keys: self.selection.clone(),
                    ..YearSheetOptions::new(self.anchor.year)
                };
                self.calendar.get_year_sheet(&options)
            }
            View::Decade | View::Century => {
                let options = YearSpanSheetOptions {
                    min_date: config.min_date,
                    max_date: config.max_date,
                    highlight_current: config.highlight_current,
                    selected_range: self.year_range(),
                    selected_keys: self.selection.clone(),
                    ..YearSpanSheetOptions::new(self.anchor.year)
                };
                if self.view == View::Decade {
                    self.calendar.get_decade_sheet(&options)
                } else {
                    self.calendar.get_century_sheet(&options)
                }
            }
            View::Time1 | View::Time2 | View::TimeRange1 | View::TimeRange2 => return None,
        };
        Some(sheet)
    }

    /// Range endpoints in sorted order; one key is a one-period range
    fn range_keys(&self) -> Option<(&str, &str)> {
        if self.mode.cardinality() != Cardinality::Range {
            return None;
        }
        let first = self.selection.iter().next()?;
        let last = self.selection.iter().next_back()?;
        Some((first.as_str(), last.as_str()))
    }

    fn day_range(&self) -> Option<SelectedRange<CalendarDate>> {
        if self.mode.granularity() != Granularity::Day {
            return None;
        }
        let (start, end) = self.range_keys()?;
        Some(SelectedRange::new(start.parse().ok()?, end.parse().ok()?))
    }

    fn month_range(&self) -> Option<SelectedRange<YearMonth>> {
        let (start, end) = self.range_keys()?;
        match self.mode.granularity() {
            Granularity::Month => Some(SelectedRange::new(start.parse().ok()?, end.parse().ok()?)),
            Granularity::Quarter => {
                let start: YearQuarter = start.parse().ok()?;
                let end: YearQuarter = end.parse().ok()?;
                Some(SelectedRange::new(start.first_month(), end.last_month()))
            }
            _ => None,
        }
    }

    fn year_range(&self) -> Option<SelectedRange<i32>> {
        if self.mode.granularity() != Granularity::Year {
            return None;
        }
        let (start, end) = self.range_keys()?;
        Some(SelectedRange::new(
            parse_year_key(start).ok()?,
            parse_year_key(end).ok()?,
        ))
    }

    // ---- notifications ----

    fn schedule_update(&mut self) {
        self.update_debouncer.schedule(self.clock.now_millis());
    }

    fn schedule_change(&mut self) {
        let now = self.clock.now_millis();
        self.update_debouncer.schedule(now);
        self.change_debouncer.schedule(now);
    }

    /// Fire debounced callbacks whose window has passed. Call from the host
    /// event loop.
    pub fn poll(&mut self) {
        if !self.enter() {
            return;
        }
        let now = self.clock.now_millis();
        if self.update_debouncer.poll(now) {
            (self.options.request_update)();
        }
        if self.change_debouncer.poll(now) {
            if let Some(on_change) = self.options.on_change.as_mut() {
                on_change();
            }
        }
    }

    pub fn has_pending_notifications(&self) -> bool {
        self.update_debouncer.is_pending() || self.change_debouncer.is_pending()
    }

    /// Drop pending callbacks and turn every later call into a no-op
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.update_debouncer.cancel();
        self.change_debouncer.cancel();
        self.destroyed = true;
        info!("🗓️ Date picker destroyed");
    }
}

impl Drop for DatePickerController {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use std::cell::Cell;

    struct Harness {
        mode: Rc<Cell<SelectionMode>>,
        updates: Rc<Cell<u32>>,
        changes: Rc<Cell<u32>>,
        clock: ManualClock,
        controller: DatePickerController,
    }

    fn harness(mode: SelectionMode) -> Harness {
        harness_with_config(mode, PickerConfig::default())
    }

    fn harness_with_config(mode: SelectionMode, config: PickerConfig) -> Harness {
        let mode = Rc::new(Cell::new(mode));
        let updates = Rc::new(Cell::new(0));
        let changes = Rc::new(Cell::new(0));
        let clock = ManualClock::new(CalendarDate::new(2024, 2, 15));

        let options = {
            let mode = mode.clone();
            let updates = updates.clone();
            let changes = changes.clone();
            ControllerOptions::new(move || mode.get(), move || updates.set(updates.get() + 1))
                .with_on_change(move || changes.set(changes.get() + 1))
        };
        let controller = DatePickerController::with_config(options, config, Rc::new(clock.clone()));

        Harness {
            mode,
            updates,
            changes,
            clock,
            controller,
        }
    }

    #[test]
    fn test_opens_on_today_in_initial_view() {
        let mut h = harness(SelectionMode::Date);
        assert_eq!(h.controller.view(), View::Month);
        assert_eq!(h.controller.anchor(), YearMonth::new(2024, 2));
        assert_eq!(h.controller.get_value(), "");

        let mut h = harness(SelectionMode::TimeRange);
        assert_eq!(h.controller.view(), View::TimeRange1);
        assert_eq!(h.controller.current_sheet(), None);
    }

    #[test]
    fn test_date_range_clicks() {
        let mut h = harness(SelectionMode::DateRange);
        let c = &mut h.controller;

        c.handle_click("day", "2024-03-15");
        assert_eq!(c.selection(), vec!["2024-03-15"]);

        c.handle_click("day", "2024-03-20");
        assert_eq!(c.selection(), vec!["2024-03-15", "2024-03-20"]);
        assert_eq!(c.get_value(), "2024-03-15|2024-03-20");

        c.handle_click("day", "2024-03-10");
        assert_eq!(c.selection(), vec!["2024-03-10"]);
    }

    #[test]
    fn test_mode_change_clears_selection_and_resets_view() {
        let mut h = harness(SelectionMode::Date);
        h.controller.click_day(CalendarDate::new(2024, 2, 15));
        assert_eq!(h.controller.get_value(), "2024-03-15");

        h.mode.set(SelectionMode::Year);
        assert_eq!(h.controller.view(), View::Decade);
        assert!(h.controller.selection().is_empty());
        assert_eq!(h.controller.get_value(), "");
    }

    #[test]
    fn test_single_and_multi_toggle() {
        let mut h = harness(SelectionMode::Dates);
        let day = CalendarDate::new(2024, 2, 5);
        h.controller.click_day(day);
        h.controller.click_day(day);
        assert!(h.controller.selection().is_empty());

        let mut h = harness(SelectionMode::Date);
        h.controller.click_day(day);
        h.controller.click_day(day);
        assert_eq!(h.controller.selection(), vec!["2024-03-05"]);
        h.controller.click_day(CalendarDate::new(2024, 2, 6));
        assert_eq!(h.controller.selection(), vec!["2024-03-06"]);
    }

    #[test]
    fn test_range_flags_do_not_depend_on_click_order() {
        let flags = |first: &str, second: &str| {
            let mut h = harness(SelectionMode::DateRange);
            h.controller.handle_click("day", first);
            h.controller.handle_click("day", second);
            h.controller
                .current_sheet()
                .unwrap()
                .items
                .iter()
                .map(|item| {
                    (
                        item.in_selected_range,
                        item.first_in_selected_range,
                        item.last_in_selected_range,
                    )
                })
                .collect::<Vec<_>>()
        };

        let forward = flags("2024-03-04", "2024-03-08");
        assert_eq!(forward, flags("2024-03-08", "2024-03-04"));
        assert_eq!(forward.iter().filter(|(in_range, _, _)| *in_range).count(), 5);
    }

    #[test]
    fn test_month_range_clicks() {
        let mut h = harness(SelectionMode::MonthRange);
        let c = &mut h.controller;
        assert_eq!(c.view(), View::Year);

        c.handle_click("month", "2024-06");
        c.handle_click("month", "2024-02");
        assert_eq!(c.get_value(), "2024-02|2024-06");
        let sheet = c.current_sheet().unwrap();
        assert_eq!(sheet.items.iter().filter(|item| item.in_selected_range).count(), 5);

        c.handle_click("month", "2024-09");
        assert_eq!(c.get_value(), "2024-09");
    }

    #[test]
    fn test_year_range_clicks_move_anchor() {
        let mut h = harness(SelectionMode::YearRange);
        let c = &mut h.controller;
        assert_eq!(c.view(), View::Decade);

        c.click_year(2025);
        c.click_year(2021);
        assert_eq!(c.get_value(), "2021|2025");
        assert_eq!(c.anchor().year, 2021);
        let sheet = c.current_sheet().unwrap();
        assert_eq!(sheet.items.iter().filter(|item| item.in_selected_range).count(), 5);

        c.click_year(2030);
        assert_eq!(c.get_value(), "2030");
        assert_eq!(c.anchor(), YearMonth::new(2030, 2));
        assert_eq!(c.current_sheet().unwrap().name, "2030-2039");
    }

    #[test]
    fn test_single_year_and_quarter_modes() {
        let mut h = harness(SelectionMode::Year);
        h.controller.handle_click("year", "2021");
        h.controller.handle_click("year", "2023");
        assert_eq!(h.controller.get_value(), "2023");
        assert_eq!(h.controller.view(), View::Decade);

        let mut h = harness(SelectionMode::Quarter);
        h.controller.handle_click("month", "2024-01");
        assert_eq!(h.controller.get_value(), "2024-Q1");
        h.controller.handle_click("month", "2024-05");
        assert_eq!(h.controller.get_value(), "2024-Q2");
        assert_eq!(h.controller.view(), View::Year);
    }

    #[test]
    fn test_clicks_on_disabled_days_are_ignored() {
        let config = PickerConfig {
            min_date: Some(CalendarDate::new(2024, 2, 1)),
            disable_weekends: true,
            ..PickerConfig::default()
        };
        let mut h = harness_with_config(SelectionMode::Date, config);
        let c = &mut h.controller;

        // adjacent cell before the min date
        c.handle_click("day", "2024-02-28");
        assert_eq!(c.get_value(), "");
        assert_eq!(c.anchor(), YearMonth::new(2024, 2));

        // Saturday
        c.handle_click("day", "2024-03-16");
        assert_eq!(c.get_value(), "");
        assert!(!c.has_pending_notifications());

        c.handle_click("day", "2024-03-15");
        assert_eq!(c.get_value(), "2024-03-15");
    }

    #[test]
    fn test_clicks_outside_bounds_are_ignored_in_every_view() {
        let config = || PickerConfig {
            max_date: Some(CalendarDate::new(2024, 5, 30)),
            ..PickerConfig::default()
        };

        let mut h = harness_with_config(SelectionMode::MonthRange, config());
        h.controller.handle_click("month", "2024-07");
        assert_eq!(h.controller.get_value(), "");
        h.controller.handle_click("month", "2024-06");
        assert_eq!(h.controller.get_value(), "2024-06");

        let mut h = harness_with_config(SelectionMode::Weeks, config());
        h.controller.handle_click("day", "2024-07-01");
        h.controller.click_week(CalendarWeek::new(2024, 27));
        assert_eq!(h.controller.get_value(), "");
        // June 24th to 30th
        h.controller.click_week(CalendarWeek::new(2024, 26));
        assert_eq!(h.controller.get_value(), "2024-W26");

        let mut h = harness_with_config(SelectionMode::Date, config());
        let c = &mut h.controller;
        c.show_view(View::Year);
        c.handle_click("month", "2024-08");
        assert_eq!(c.view(), View::Year);

        c.show_view(View::Decade);
        c.handle_click("year", "2025");
        assert_eq!(c.view(), View::Decade);

        c.show_view(View::Century);
        c.handle_click("decade", "2030");
        assert_eq!(c.view(), View::Century);
        c.handle_click("decade", "2020");
        assert_eq!(c.view(), View::Decade);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_years_stop_at_9999() {
        let mut h = harness(SelectionMode::YearRange);
        let c = &mut h.controller;
        c.click_year(9999);
        c.click_year(10000);
        assert_eq!(c.get_value(), "9999");
        c.click_next();
        assert_eq!(c.anchor().year, 9999);
        assert!(c.set_value("10000").is_err());
        assert_eq!(c.get_value(), "9999");

        let mut h = harness(SelectionMode::Date);
        let c = &mut h.controller;
        c.navigate_to(YearMonth::new(10005, 0));
        assert_eq!(c.anchor(), YearMonth::new(9999, 11));
        c.click_next();
        assert_eq!(c.anchor(), YearMonth::new(9999, 11));
        c.click_day(CalendarDate::new(10000, 0, 1));
        assert_eq!(c.get_value(), "");
        c.click_day(CalendarDate::new(9999, 11, 31));
        assert_eq!(c.get_value(), "9999-12-31");
    }

    #[test]
    fn test_week_mode_selects_row_week() {
        let mut h = harness(SelectionMode::Weeks);
        // Wednesday 2024-03-13 sits in ISO week 11
        h.controller.handle_click("day", "2024-03-13");
        assert_eq!(h.controller.get_value(), "2024-W11");

        let sheet = h.controller.current_sheet().unwrap();
        let selected = sheet.items.iter().filter(|item| item.selected).count();
        assert_eq!(selected, 7);

        h.controller.click_week(CalendarWeek::new(2024, 11));
        assert_eq!(h.controller.get_value(), "");
    }

    #[test]
    fn test_quarter_mode_selects_quarter_of_clicked_month() {
        let mut h = harness(SelectionMode::QuarterRange);
        assert_eq!(h.controller.view(), View::Year);

        h.controller.handle_click("month", "2024-02");
        h.controller.handle_click("month", "2024-08");
        assert_eq!(h.controller.get_value(), "2024-Q1|2024-Q3");

        let sheet = h.controller.current_sheet().unwrap();
        let in_range = sheet.items.iter().filter(|item| item.in_selected_range).count();
        assert_eq!(in_range, 9);
    }

    #[test]
    fn test_drill_up_and_down() {
        let mut h = harness(SelectionMode::Date);
        let c = &mut h.controller;

        c.click_title();
        assert_eq!(c.view(), View::Year);
        c.click_title();
        assert_eq!(c.view(), View::Decade);
        c.click_title();
        assert_eq!(c.view(), View::Century);
        c.click_title();
        assert_eq!(c.view(), View::Century);

        c.handle_click("decade", "1990");
        assert_eq!(c.view(), View::Decade);
        c.handle_click("year", "1995");
        assert_eq!(c.view(), View::Year);
        c.handle_click("month", "1995-07");
        assert_eq!(c.view(), View::Month);
        assert_eq!(c.anchor(), YearMonth::new(1995, 6));
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_prev_next_step_by_view() {
        let mut h = harness(SelectionMode::Date);
        let c = &mut h.controller;

        c.click_prev();
        assert_eq!(c.anchor(), YearMonth::new(2024, 1));
        c.click_next();
        c.click_next();
        assert_eq!(c.anchor(), YearMonth::new(2024, 3));

        c.show_view(View::Year);
        c.click_next();
        assert_eq!(c.anchor(), YearMonth::new(2025, 3));
        c.click_prev();
        c.click_prev();
        assert_eq!(c.anchor(), YearMonth::new(2023, 3));

        c.show_view(View::Decade);
        c.click_next();
        assert_eq!(c.anchor().year, 2030);

        c.show_view(View::Century);
        c.click_prev();
        assert_eq!(c.anchor().year, 1900);
    }

    #[test]
    fn test_navigation_stops_at_min_date() {
        let config = PickerConfig {
            min_date: Some(CalendarDate::new(2024, 2, 1)),
            ..PickerConfig::default()
        };
        let mut h = harness_with_config(SelectionMode::Date, config);

        h.controller.click_prev();
        assert_eq!(h.controller.anchor(), YearMonth::new(2024, 2));
    }

    #[test]
    fn test_time_range_clamp() {
        let mut h = harness(SelectionMode::TimeRange);
        let c = &mut h.controller;

        c.handle_input("hours", "18");
        assert_eq!(c.get_value(), "18:00|18:00");

        c.handle_input("hours2", "9");
        assert_eq!(c.get_value(), "09:00|09:00");

        c.handle_input("minutes2", "30");
        c.handle_input("hours2", "17");
        c.handle_input("minutes", "45");
        assert_eq!(c.get_value(), "09:45|17:30");

        for (subject, value) in [("hours", "20"), ("minutes2", "5"), ("hours2", "3"), ("minutes", "59")] {
            c.handle_input(subject, value);
            assert!(c.start_time() <= c.end_time());
        }
    }

    #[test]
    fn test_date_time_range_only_clamps_within_one_day() {
        let mut h = harness(SelectionMode::DateTimeRange);
        let c = &mut h.controller;

        c.handle_click("day", "2024-03-15");
        assert_eq!(c.get_value(), "2024-03-15T00:00|2024-03-15T00:00");
        c.handle_click("day", "2024-03-16");
        c.handle_input("hours", "22");
        c.handle_input("hours2", "6");
        assert_eq!(c.get_value(), "2024-03-15T22:00|2024-03-16T06:00");
    }

    #[test]
    fn test_malformed_events_are_ignored() {
        let mut h = harness(SelectionMode::Date);
        let c = &mut h.controller;

        c.handle_click("day", "not-a-date");
        c.handle_click("warp", "2024-03-15");
        c.handle_input("hours", "25");
        c.handle_input("minutes", "abc");

        assert_eq!(c.get_value(), "");
        assert_eq!(c.view(), View::Month);
        assert!(!c.has_pending_notifications());
    }

    #[test]
    fn test_notifications_are_debounced() {
        let mut h = harness(SelectionMode::Dates);

        h.controller.handle_click("day", "2024-03-01");
        h.clock.advance(20);
        h.controller.handle_click("day", "2024-03-02");
        h.clock.advance(20);
        h.controller.handle_click("day", "2024-03-03");
        h.controller.poll();
        assert_eq!(h.updates.get(), 0);
        assert_eq!(h.changes.get(), 0);

        h.clock.advance(50);
        h.controller.poll();
        h.controller.poll();
        assert_eq!(h.updates.get(), 1);
        assert_eq!(h.changes.get(), 1);
    }

    #[test]
    fn test_navigation_requests_update_without_change() {
        let mut h = harness(SelectionMode::Date);
        h.controller.click_next();
        h.clock.advance(50);
        h.controller.poll();

        assert_eq!(h.updates.get(), 1);
        assert_eq!(h.changes.get(), 0);
    }

    #[test]
    fn test_destroy_cancels_pending_callbacks() {
        let mut h = harness(SelectionMode::Date);
        h.controller.handle_click("day", "2024-03-01");
        h.controller.destroy();
        h.clock.advance(100);
        h.controller.poll();
        h.controller.handle_click("day", "2024-03-02");

        assert_eq!(h.updates.get(), 0);
        assert_eq!(h.changes.get(), 0);
        assert!(h.controller.is_destroyed());
        assert!(matches!(h.controller.set_value("2024-03-02"), Err(PickerError::Destroyed)));
    }

    #[test]
    fn test_set_value_moves_anchor_without_change_notification() {
        let mut h = harness(SelectionMode::DateRange);
        h.controller.set_value(" 2023-11-20 | 2023-11-02 ").unwrap();

        assert_eq!(h.controller.get_value(), "2023-11-02|2023-11-20");
        assert_eq!(h.controller.anchor(), YearMonth::new(2023, 10));

        h.clock.advance(50);
        h.controller.poll();
        assert_eq!(h.updates.get(), 1);
        assert_eq!(h.changes.get(), 0);
    }

    #[test]
    fn test_set_value_is_atomic() {
        let mut h = harness(SelectionMode::Dates);
        h.controller.set_value("2024-03-01").unwrap();

        assert!(h.controller.set_value("2024-03-02,2024-13-01").is_err());
        assert_eq!(h.controller.get_value(), "2024-03-01");
    }

    #[test]
    fn test_set_value_empty_clears_time() {
        let mut h = harness(SelectionMode::DateTime);
        h.controller.set_value("2024-03-15T10:30").unwrap();
        assert_eq!(h.controller.start_time(), CalendarTime::new(10, 30));

        h.controller.set_value("  ").unwrap();
        assert_eq!(h.controller.get_value(), "");
        assert_eq!(h.controller.start_time(), CalendarTime::default());
    }

    #[test]
    fn test_value_round_trips_through_controller() {
        let samples = [
            (SelectionMode::Dates, "2024-03-01,2024-03-09"),
            (SelectionMode::DateTimeRange, "2024-03-15T08:30|2024-03-20T10:00"),
            (SelectionMode::DateTimeRange, "2024-03-15T08:00|2024-03-15T17:00"),
            (SelectionMode::TimeRange, "07:15|19:45"),
            (SelectionMode::Week, "2024-W11"),
            (SelectionMode::QuarterRange, "2024-Q2|2025-Q1"),
            (SelectionMode::Years, "1999,2024"),
        ];

        for (mode, value) in samples {
            let mut h = harness(mode);
            h.controller.set_value(value).unwrap();
            let first = h.controller.get_value();
            h.controller.set_value(&first).unwrap();
            assert_eq!(h.controller.get_value(), first);
            assert_eq!(first, value);
        }
    }

    #[test]
    fn test_state_snapshot() {
        let mut h = harness(SelectionMode::Month);
        h.controller.handle_click("month", "2024-05");
        let state = h.controller.state();

        assert_eq!(state.view, View::Year);
        assert_eq!(state.value, "2024-05");
        let sheet = state.sheet.unwrap();
        assert_eq!(sheet.items.len(), 12);
        assert!(sheet.items[4].selected);
    }
}
