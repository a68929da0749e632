use scraper::Html;
use std::collections::HashMap;

use crate::core::metrics::compute_attendance_metrics;
use crate::core::table::{Row, TableSpec, extract_rows};
use crate::core::text::{parse_leading_float, parse_leading_int};
use crate::model::attendance::AttendanceRecord;

/// The attendance table is the only one on the page with this background.
pub const ATTENDANCE_TABLE: TableSpec = TableSpec::new("attendance", "table[bgcolor='#FAFAD2']");

const MIN_CELLS: usize = 9;

/// Builds records from the attendance table's rows, header included.
pub fn attendance_from_rows(rows: &[Row], target_percentage: f64) -> Vec<AttendanceRecord> {
    rows.iter()
        .skip(1)
        .filter(|row| row.len() >= MIN_CELLS)
        .filter_map(|cells| {
            // The code cell also holds the course type in a <font> on its own line.
            let course_code = cells[0].text.split('\n').next().unwrap_or("").trim();
            if course_code.is_empty() {
                return None;
            }

            let hours_conducted = parse_leading_int(&cells[6].text).unwrap_or(0);
            let hours_absent = parse_leading_int(&cells[7].text).unwrap_or(0);
            let hours_present = hours_conducted - hours_absent;

            let percentage_text = if cells[8].emphasis.is_empty() {
                &cells[8].text
            } else {
                &cells[8].emphasis
            };
            let attendance_percentage = parse_leading_float(percentage_text).unwrap_or(0.0);

            let metrics = compute_attendance_metrics(hours_present, hours_conducted, target_percentage);

            let course_type = if cells[0].emphasis.is_empty() {
                "Regular".to_string()
            } else {
                cells[0].emphasis.clone()
            };

            Some(AttendanceRecord {
                course_code: course_code.to_string(),
                course_type,
                course_title: cells[1].text.clone(),
                category: cells[2].text.clone(),
                faculty_name: cells[3].text.clone(),
                room_no: cells[5].text.clone(),
                hours_conducted,
                hours_present,
                hours_absent,
                attendance_percentage,
                can_skip: metrics.can_skip,
                need_to_attend: metrics.need_to_attend,
                status: metrics.status,
            })
        })
        .collect()
}

pub fn parse_attendance(document: &Html, target_percentage: f64) -> Vec<AttendanceRecord> {
    attendance_from_rows(&extract_rows(document, &ATTENDANCE_TABLE), target_percentage)
}

/// Course code → title, read from the attendance table so the marks table
/// (which only lists codes) can be labelled.
pub fn course_titles_from_rows(rows: &[Row]) -> HashMap<String, String> {
    rows.iter()
        .skip(1)
        .filter(|row| row.len() >= 2)
        .filter_map(|cells| {
            let code = &cells[0].plain;
            let title = &cells[1].text;
            (!code.is_empty() && !title.is_empty()).then(|| (code.clone(), title.clone()))
        })
        .collect()
}

pub fn course_title_map(document: &Html) -> HashMap<String, String> {
    course_titles_from_rows(&extract_rows(document, &ATTENDANCE_TABLE))
}
