use log::warn;
use scraper::Html;

use crate::core::table::{Row, Scope, Table, TableSpec, extract_rows, extract_tables, select_text};
use crate::error::{PageError, StructureReason};
use crate::model::calendar::{AcademicCalendar, CalendarEvent};
use crate::model::ordered_map::OrderedMap;

pub const MONTH_TABLE: TableSpec = TableSpec {
    rows: Scope::Select("tbody tr"),
    emphasis: "strong",
    ..TableSpec::new("calendar", "table.calendar_tbl")
};

pub const LEGEND_TABLE: TableSpec = TableSpec::new("legend", "table.legend_tbl");

const NOTE: &str = "div.note, p.note";
const PAGE_TITLE: &str = "div.mainDiv > div.LogoDiv > h2[align='center']";
const COLLEGE_NAME: &str = "div.mainDiv > div.LogoDiv > h3[align='center']";
const INSTITUTE_NAME: &str = "div.mainDiv > div.LogoDiv > p.small[align='center']";

/// Events per month. A table is a month when its caption is non-empty; each
/// cell with a bold date and some remaining text is one event.
pub fn events_from_tables(tables: &[Table]) -> OrderedMap<Vec<CalendarEvent>> {
    let mut months = OrderedMap::new();
    for table in tables {
        if table.caption.is_empty() {
            continue;
        }
        let events = table
            .rows
            .iter()
            .flatten()
            .filter_map(|cell| {
                let date = cell.emphasis.as_str();
                let event = cell.text.replacen(date, "", 1);
                let event = event.trim();
                (!date.is_empty() && !event.is_empty()).then(|| CalendarEvent {
                    date: date.to_string(),
                    event: event.to_string(),
                })
            })
            .collect::<Vec<_>>();
        // A repeated caption restarts that month.
        months.insert(table.caption.clone(), events);
    }
    months
}

/// Symbol → meaning from two-cell legend rows.
pub fn legend_from_rows(rows: &[Row]) -> OrderedMap<String> {
    rows.iter()
        .filter(|cells| cells.len() == 2)
        .filter(|cells| !cells[0].text.is_empty() && !cells[1].text.is_empty())
        .map(|cells| (cells[0].text.clone(), cells[1].text.clone()))
        .collect()
}

/// Reads the academic planner.
///
/// An empty planner is valid, but one that also lacks both the title and
/// the college heading is not the planner page at all.
pub fn parse_calendar(document: &Html) -> Result<AcademicCalendar, PageError> {
    let calendar = AcademicCalendar {
        title: select_text(document, PAGE_TITLE),
        college: select_text(document, COLLEGE_NAME),
        institute: select_text(document, INSTITUTE_NAME),
        note: select_text(document, NOTE),
        legend: legend_from_rows(&extract_rows(document, &LEGEND_TABLE)),
        events: events_from_tables(&extract_tables(document, &MONTH_TABLE)),
    };

    if calendar.events.is_empty() && calendar.title.is_empty() && calendar.college.is_empty() {
        warn!("calendar: no months and no page headings");
        return Err(PageError::StructureNotFound {
            page: "calendar",
            reason: StructureReason::StructureChanged,
        });
    }

    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Cell;
    use pretty_assertions::assert_eq;

    fn day(date: &str, event: &str) -> Cell {
        Cell::new(&format!("{date} {event}")).with_emphasis(date)
    }

    #[test]
    fn events_keep_month_order_and_skip_blank_cells() {
        let tables = vec![
            Table {
                caption: "Jul '25".into(),
                rows: vec![vec![day("1", "Enrollment day"), day("2", ""), Cell::new("Tue")]],
            },
            Table {
                caption: String::new(),
                rows: vec![vec![day("9", "ignored")]],
            },
            Table {
                caption: "Aug '25".into(),
                rows: vec![vec![day("15", "Independence Day - Holiday")]],
            },
        ];
        let events = events_from_tables(&tables);
        assert_eq!(events.keys().collect::<Vec<_>>(), vec!["Jul '25", "Aug '25"]);
        assert_eq!(
            events.get("Jul '25").unwrap(),
            &vec![CalendarEvent {
                date: "1".into(),
                event: "Enrollment day".into(),
            }]
        );
    }

    #[test]
    fn repeated_month_caption_restarts_the_month() {
        let tables = vec![
            Table {
                caption: "Jul".into(),
                rows: vec![vec![day("1", "a")]],
            },
            Table {
                caption: "Jul".into(),
                rows: vec![vec![day("2", "b")]],
            },
        ];
        let events = events_from_tables(&tables);
        assert_eq!(events.len(), 1);
        assert_eq!(events.get("Jul").unwrap()[0].event, "b");
    }

    #[test]
    fn legend_needs_two_non_empty_cells() {
        let rows = vec![
            vec![Cell::new("*"), Cell::new("Holiday")],
            vec![Cell::new("#"), Cell::new("")],
            vec![Cell::new("a"), Cell::new("b"), Cell::new("c")],
        ];
        let legend = legend_from_rows(&rows);
        assert_eq!(legend.len(), 1);
        assert_eq!(legend.get("*").map(String::as_str), Some("Holiday"));
    }

    #[test]
    fn headless_empty_page_is_not_a_planner() {
        let document = Html::parse_document("<div>nothing</div>");
        assert!(parse_calendar(&document).is_err());
    }

    #[test]
    fn titled_empty_planner_is_valid() {
        let document = Html::parse_document(
            "<div class='mainDiv'><div class='LogoDiv'><h2 align='center'>Academic Planner</h2></div></div>",
        );
        let calendar = parse_calendar(&document).unwrap();
        assert_eq!(calendar.title, "Academic Planner");
        assert!(calendar.events.is_empty());
    }
}
