//! Markup for sheets and time panels.
//!
//! Every clickable element carries the `data-subject` / `data-value` pair
//! that [`DatePickerController::handle_click`] and
//! [`DatePickerController::handle_input`] parse, so a host only has to read
//! those two attributes off the event target.

use shared::{CalendarTime, SelectionMode, Sheet, SheetItem, View, YearMonth};

use crate::domain::calendar_utils::year_key;
use crate::domain::controller::{DatePickerController, PickerState};
use crate::io::vdom::{text, VNode};

const PREV_LABEL: &str = "‹";
const NEXT_LABEL: &str = "›";

/// The `data-subject` of the cells a view shows
fn cell_subject(view: View) -> &'static str {
    match view {
        View::Year => "month",
        View::Decade => "year",
        View::Century => "decade",
        _ => "day",
    }
}

/// The `data-value` that names a cell for its view
fn cell_value(view: View, item: &SheetItem) -> String {
    match view {
        View::Year => YearMonth::new(item.year, item.month.unwrap_or(0)).key(),
        View::Decade | View::Century => year_key(item.year),
        _ => item
            .date()
            .map(|date| date.key())
            .unwrap_or_else(|| item.selection_key.clone()),
    }
}

fn cell_classes(item: &SheetItem) -> String {
    let flags = [
        (item.current, "current"),
        (item.highlighted, "highlighted"),
        (item.adjacent, "adjacent"),
        (item.disabled, "disabled"),
        (item.out_of_min_max_range, "out-of-range"),
        (item.selected, "selected"),
        (item.in_selected_range, "in-range"),
        (item.first_in_selected_range, "range-start"),
        (item.last_in_selected_range, "range-end"),
    ];
    std::iter::once("cell")
        .chain(flags.iter().filter(|(on, _)| *on).map(|(_, class)| *class))
        .collect::<Vec<_>>()
        .join(" ")
}

fn button(subject: &str, label: impl Into<String>, disabled: bool) -> VNode {
    let node = VNode::el("button")
        .attr("type", "button")
        .attr("data-subject", subject)
        .child(text(label));
    if disabled {
        node.attr("disabled", "")
    } else {
        node
    }
}

/// Render one sheet with its navigation header
pub fn render_sheet(sheet: &Sheet, view: View) -> VNode {
    let header = VNode::el("div").attr("class", "sheet-header").children([
        button("prev", PREV_LABEL, sheet.previous.disabled),
        button("title", sheet.name.clone(), view.drill_up().is_none()),
        button("next", NEXT_LABEL, sheet.next.disabled),
    ]);

    let has_row_names = !sheet.row_names.is_empty();
    let mut grid = VNode::el("div")
        .attr("class", "sheet-grid")
        .attr("role", "grid")
        .attr("data-columns", sheet.column_count.to_string());

    if !sheet.column_names.is_empty() {
        let mut head = VNode::el("div").attr("class", "sheet-row column-names");
        if has_row_names {
            head = head.child(VNode::el("span").attr("class", "row-name"));
        }
        for (column, name) in sheet.column_names.iter().enumerate() {
            let class = if sheet.highlighted_columns.contains(&column) {
                "column-name highlighted"
            } else {
                "column-name"
            };
            head = head.child(VNode::el("span").attr("class", class).child(text(name.clone())));
        }
        grid = grid.child(head);
    }

    for (index, row) in sheet.rows().enumerate() {
        let mut row_node = VNode::el("div").attr("class", "sheet-row").attr("role", "row");
        if let Some(row_name) = sheet.row_names.get(index) {
            row_node = row_node.child(render_row_name(row_name, row));
        }
        row_node = row_node.children(row.iter().map(|item| render_cell(item, view)));
        grid = grid.child(row_node);
    }

    VNode::el("div")
        .attr("class", format!("sheet sheet-{}", view))
        .attr("data-view", view.as_str())
        .children([header, grid])
}

/// Week numbers are clickable only when the cells select whole weeks
fn render_row_name(name: &str, row: &[SheetItem]) -> VNode {
    let week = row.first().and_then(|item| item.week);
    match week {
        Some(week) => button("week", name, false)
            .attr("class", "row-name")
            .attr("data-value", week.key()),
        None => VNode::el("span").attr("class", "row-name").child(text(name)),
    }
}

fn render_cell(item: &SheetItem, view: View) -> VNode {
    let mut cell = button(cell_subject(view), item.name.clone(), item.disabled)
        .attr("class", cell_classes(item))
        .attr("role", "gridcell")
        .attr("data-value", cell_value(view, item))
        .attr("data-key", item.selection_key.clone());
    if item.selected {
        cell = cell.attr("aria-selected", "true");
    }
    if item.current {
        cell = cell.attr("aria-current", "date");
    }
    cell
}

fn slider(subject: &str, label: &str, max: u32, value: u32) -> VNode {
    VNode::el("label").attr("class", "time-field").children([
        text(label),
        VNode::el("input")
            .attr("type", "range")
            .attr("min", "0")
            .attr("max", max.to_string())
            .attr("value", value.to_string())
            .attr("data-subject", subject),
    ])
}

/// Tabs for switching between the calendar and the time panels of a mode
fn view_tabs(mode: SelectionMode, active: View) -> Vec<VNode> {
    let tabs: &[(&str, View, &str)] = match mode {
        SelectionMode::DateTime => &[("view-month", View::Month, "Date"), ("time1", View::Time1, "Time")],
        SelectionMode::DateTimeRange => &[
            ("view-month", View::Month, "Dates"),
            ("time1", View::Time1, "Start"),
            ("time2", View::Time2, "End"),
        ],
        SelectionMode::TimeRange => &[
            ("timeRange1", View::TimeRange1, "Start"),
            ("timeRange2", View::TimeRange2, "End"),
        ],
        _ => &[],
    };
    tabs.iter()
        .map(|(subject, view, label)| {
            let is_active = *view == active || (!active.is_time() && *view == View::Month);
            let tab = button(subject, *label, false);
            if is_active {
                tab.attr("class", "tab active").attr("aria-pressed", "true")
            } else {
                tab.attr("class", "tab")
            }
        })
        .collect()
}

/// Sliders for the start time (`time1`/`timeRange1`) or end time
pub fn render_time_panel(view: View, start_time: CalendarTime, end_time: CalendarTime) -> VNode {
    let is_end = matches!(view, View::Time2 | View::TimeRange2);
    let (time, hours, minutes) = if is_end {
        (end_time, "hours2", "minutes2")
    } else {
        (start_time, "hours", "minutes")
    };

    VNode::el("div")
        .attr("class", "time-panel")
        .attr("data-view", view.as_str())
        .children([
            VNode::el("output").attr("class", "time-value").child(text(time.key())),
            slider(hours, "Hours", 23, time.hours),
            slider(minutes, "Minutes", 59, time.minutes),
        ])
}

/// Render the picker for a state snapshot
pub fn render_state(state: &PickerState) -> VNode {
    let body = match &state.sheet {
        Some(sheet) => render_sheet(sheet, state.view),
        None => render_time_panel(state.view, state.start_time, state.end_time),
    };

    let tabs = view_tabs(state.mode, state.view);
    let mut root = VNode::el("div")
        .attr("class", "datepicker")
        .attr("data-mode", state.mode.as_str())
        .attr("data-value", state.value.clone());
    if !tabs.is_empty() {
        root = root.child(VNode::el("div").attr("class", "view-tabs").children(tabs));
    }
    root.child(body)
}

/// Render whatever the controller's active view shows
pub fn render_picker(controller: &mut DatePickerController) -> VNode {
    render_state(&controller.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::{CalendarService, MonthSheetOptions};
    use crate::domain::clock::ManualClock;
    use crate::domain::controller::ControllerOptions;
    use crate::domain::locale::LocaleFormatter;
    use crate::io::vdom::{diff, render_to_string, VElement};
    use shared::{CalendarDate, PickerConfig};
    use std::cell::Cell;
    use std::rc::Rc;

    fn clock() -> ManualClock {
        ManualClock::new(CalendarDate::new(2024, 1, 14))
    }

    fn controller(mode: SelectionMode) -> DatePickerController {
        let mode = Rc::new(Cell::new(mode));
        DatePickerController::with_config(
            ControllerOptions::new(move || mode.get(), || {}),
            PickerConfig::default(),
            Rc::new(clock()),
        )
    }

    fn with_subject<'a>(tree: &'a VNode, subject: &str) -> Vec<&'a VElement> {
        tree.find_all(&|el| el.attrs.get("data-subject").map(String::as_str) == Some(subject))
    }

    #[test]
    fn test_month_sheet_cells_carry_day_keys() {
        let service = CalendarService::with_clock(LocaleFormatter::new("en-US"), Rc::new(clock()));
        let sheet = service.get_month_sheet(&MonthSheetOptions::new(2024, 1));
        let tree = render_sheet(&sheet, View::Month);

        let days = with_subject(&tree, "day");
        assert_eq!(days.len(), 35);
        assert_eq!(days[0].attrs["data-value"], "2024-01-28");
        assert!(days[0].attrs["class"].contains("adjacent"));

        let today: Vec<_> = days
            .iter()
            .filter(|el| el.attrs.contains_key("aria-current"))
            .collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].attrs["data-value"], "2024-02-14");
    }

    #[test]
    fn test_rendered_attributes_drive_the_controller() {
        let mut picker = controller(SelectionMode::Dates);
        let tree = render_picker(&mut picker);

        let day = with_subject(&tree, "day")
            .into_iter()
            .find(|el| el.attrs["data-value"] == "2024-02-20")
            .unwrap();
        picker.handle_click(&day.attrs["data-subject"], &day.attrs["data-value"]);
        assert_eq!(picker.get_value(), "2024-02-20");

        let rerendered = render_picker(&mut picker);
        let selected = rerendered.find_all(&|el| el.attrs.contains_key("aria-selected"));
        assert_eq!(selected.len(), 1);
        assert!(selected[0].attrs["class"].contains("selected"));

        // Only the clicked cell and the root's data-value change
        assert_eq!(diff(&tree, &rerendered).len(), 2);
    }

    #[test]
    fn test_week_numbers_are_clickable_in_week_modes() {
        let mut picker = controller(SelectionMode::Week);
        let tree = render_picker(&mut picker);
        // Default config hides week numbers
        assert!(with_subject(&tree, "week").is_empty());

        let service = CalendarService::with_clock(LocaleFormatter::new("en-US"), Rc::new(clock()));
        let options = MonthSheetOptions {
            show_week_numbers: true,
            select_weeks: true,
            ..MonthSheetOptions::new(2024, 1)
        };
        let tree = render_sheet(&service.get_month_sheet(&options), View::Month);
        let weeks = with_subject(&tree, "week");
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].attrs["data-value"], "2024-W05");
    }

    #[test]
    fn test_time_range_panel() {
        let mut picker = controller(SelectionMode::TimeRange);
        picker.handle_input("hours", "8");
        picker.handle_input("hours2", "17");
        picker.show_view(View::TimeRange2);

        let tree = render_picker(&mut picker);
        let hours = with_subject(&tree, "hours2");
        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].attrs["value"], "17");
        assert_eq!(hours[0].attrs["max"], "23");
        assert_eq!(with_subject(&tree, "timeRange1").len(), 1);
        assert_eq!(tree.get_attr("data-value"), Some("08:00|17:00"));
    }

    #[test]
    fn test_year_and_decade_views() {
        let mut picker = controller(SelectionMode::Month);
        let tree = render_picker(&mut picker);
        let months = with_subject(&tree, "month");
        assert_eq!(months.len(), 12);
        assert_eq!(months[11].attrs["data-value"], "2024-12");

        picker.click_title();
        let tree = render_picker(&mut picker);
        let years = with_subject(&tree, "year");
        assert_eq!(years.len(), 12);
        assert_eq!(years[0].attrs["data-value"], "2019");
    }

    #[test]
    fn test_html_output() {
        let mut picker = controller(SelectionMode::Date);
        picker.click_title();
        picker.click_title();
        picker.click_title();

        let html = render_to_string(&render_picker(&mut picker));
        assert!(html.starts_with("<div class=\"datepicker\" data-mode=\"date\""));
        assert!(html.contains("data-subject=\"decade\""));
        // Century is the top level, so the title does not drill further
        assert!(html.contains("data-subject=\"title\" disabled=\"\""));
    }
}
