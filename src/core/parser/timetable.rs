use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use crate::core::slots;
use crate::core::table::{Row, TableSpec, extract_key_value_rows, extract_rows};
use crate::model::ordered_map::OrderedMap;
use crate::model::timetable::{RegisteredCourse, Timetable};

pub const STUDENT_DETAILS_TABLE: TableSpec = TableSpec::new(
    "student details",
    r#"div[style*="line-height:150%"] > table[border="0"][align="left"]"#,
);

pub const COURSE_TABLE: TableSpec = TableSpec::new("courses", "table.course_tbl");

/// Labels the batch number has been published under.
const BATCH_LABELS: [&str; 2] = ["Combo / Batch", "Batch"];

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digits pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Canonical field name for a course table header.
pub fn course_field(header: &str) -> String {
    let header = header.trim().replacen('.', "", 1);
    let known = match header.as_str() {
        "SNo" => "sNo",
        "Course Code" => "courseCode",
        "Course Title" => "courseTitle",
        "Credit" => "credit",
        "Regn Type" => "regType",
        "Category" => "category",
        "Course Type" => "courseType",
        "Faculty Name" => "facultyName",
        "Slot" => "slot",
        "Room No" => "roomNo",
        "Academic Year" => "academicYear",
        other => return WHITESPACE.replace_all(&other.to_lowercase(), "_").into_owned(),
    };
    known.to_string()
}

/// Registered courses keyed by the header row's field names. Rows without a
/// serial number are layout filler and are dropped.
pub fn courses_from_rows(rows: &[Row]) -> Vec<RegisteredCourse> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };
    let fields: Vec<String> = header.iter().map(|cell| course_field(&cell.text)).collect();

    body.iter()
        .map(|cells| {
            fields
                .iter()
                .zip(cells)
                .filter(|(field, _)| !field.is_empty())
                .map(|(field, cell)| (field.clone(), cell.text.clone()))
                .collect::<RegisteredCourse>()
        })
        .filter(|course| {
            !course.is_empty() && course.get("sNo").is_some_and(|sno| !sno.is_empty())
        })
        .collect()
}

/// Batch number from the student details: tags stripped, first digit run,
/// or the cleaned label itself when it has no digits.
pub fn batch_number(details: &OrderedMap<String>) -> Option<String> {
    let raw = details.first_of(&BATCH_LABELS)?;
    let clean = TAG.replace_all(raw, "");
    let clean = clean.trim();
    Some(
        DIGITS
            .find(clean)
            .map_or_else(|| clean.to_string(), |m| m.as_str().to_string()),
    )
}

pub fn parse_timetable(document: &Html) -> Timetable {
    let student_details = extract_key_value_rows(document, &STUDENT_DETAILS_TABLE);
    let courses = courses_from_rows(&extract_rows(document, &COURSE_TABLE));
    let batch = batch_number(&student_details);

    let slots = slots::expand(batch.as_deref().unwrap_or(""), &courses)
        .into_iter()
        .filter(|entry| entry.course.is_some())
        .collect();

    Timetable {
        student_details,
        batch,
        courses,
        slots,
    }
}
