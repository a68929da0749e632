use regex::Regex;
use scraper::Html;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::table::{Cell, Row, Scope, TableSpec, extract_rows};
use crate::core::text::{parse_leading_float, round2};
use crate::model::marks::{InternalMarksRecord, TestScore};

/// The marks table is the second `border=1, align=center` table on the
/// attendance page; the first one is the report header. A different
/// position here means the portal template changed.
pub const MARKS_TABLE_POSITION: usize = 1;

pub const MARKS_TABLE: TableSpec = TableSpec {
    name: "internal marks",
    table: "table[border='1'][align='center']",
    position: Some(MARKS_TABLE_POSITION),
    rows: Scope::Direct,
    cells: Scope::Direct,
    emphasis: "strong",
};

static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("course code pattern"));

/// `<name>/<max>` as printed in bold at the top of each test cell.
static TEST_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_\s-]+)/([0-9.]+)").expect("test header pattern"));

/// One test column: bold `CLA-1/25` followed by the mark obtained, if any.
pub fn test_score(cell: &Cell) -> Option<TestScore> {
    let caps = TEST_HEADER.captures(&cell.emphasis)?;
    let test_name = caps[1].trim().to_string();
    let max_marks = parse_leading_float(&caps[2])?;

    let obtained = cell.text.replacen(cell.emphasis.as_str(), "", 1);
    let obtained = obtained.trim();
    let obtained_marks = if obtained.is_empty() {
        None
    } else {
        parse_leading_float(obtained)
    };

    Some(TestScore {
        test_name,
        max_marks,
        obtained_marks,
    })
}

fn is_course_code(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    COURSE_CODE.is_match(&compact)
}

/// Builds records from the marks table's rows, header included. Titles come
/// from `course_titles`, keyed by course code.
pub fn marks_from_rows(
    rows: &[Row],
    course_titles: &HashMap<String, String>,
) -> Vec<InternalMarksRecord> {
    rows.iter()
        .skip(1)
        .filter(|row| row.len() >= 3)
        .filter(|cells| is_course_code(&cells[0].text))
        .map(|cells| {
            let course_code = cells[0].text.clone();
            let tests: Vec<TestScore> = cells[2].nested.iter().filter_map(test_score).collect();

            let total_max_marks: f64 = tests.iter().map(|t| t.max_marks).sum();
            let total_obtained_marks: f64 =
                tests.iter().map(|t| t.obtained_marks.unwrap_or(0.0)).sum();
            let percentage = (total_max_marks > 0.0)
                .then(|| round2(total_obtained_marks / total_max_marks * 100.0));

            InternalMarksRecord {
                course_title: course_titles.get(&course_code).cloned(),
                course_code,
                course_type: cells[1].text.clone(),
                tests,
                total_max_marks,
                total_obtained_marks,
                percentage,
            }
        })
        .collect()
}

pub fn parse_internal_marks(
    document: &Html,
    course_titles: &HashMap<String, String>,
) -> Vec<InternalMarksRecord> {
    marks_from_rows(&extract_rows(document, &MARKS_TABLE), course_titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_cell(bold: &str, mark: &str) -> Cell {
        Cell {
            text: format!("{bold}{mark}"),
            emphasis: bold.to_string(),
            plain: mark.to_string(),
            nested: Vec::new(),
        }
    }

    fn marks_row(code: &str, kind: &str, tests: Vec<Cell>) -> Row {
        vec![Cell::new(code), Cell::new(kind), Cell::new("").with_nested(tests)]
    }

    fn header() -> Row {
        vec![Cell::new("Course Code"), Cell::new("Course Type"), Cell::new("Test Performance")]
    }

    #[test]
    fn reads_test_name_max_and_obtained() {
        assert_eq!(
            test_score(&test_cell("CLA-1/25", "20")),
            Some(TestScore {
                test_name: "CLA-1".into(),
                max_marks: 25.0,
                obtained_marks: Some(20.0),
            })
        );
    }

    #[test]
    fn missing_or_textual_mark_is_null() {
        assert_eq!(test_score(&test_cell("FT-II/10.00", "")).unwrap().obtained_marks, None);
        assert_eq!(test_score(&test_cell("FT-II/10.00", "Abs")).unwrap().obtained_marks, None);
    }

    #[test]
    fn cell_without_header_is_ignored() {
        assert_eq!(test_score(&test_cell("", "20")), None);
        assert_eq!(test_score(&test_cell("Total", "20")), None);
    }

    #[test]
    fn totals_and_percentage_cover_present_tests() {
        let titles = HashMap::from([("21CSC201J".to_string(), "Data Structures".to_string())]);
        let rows = vec![
            header(),
            marks_row(
                "21CSC201J",
                "Theory",
                vec![test_cell("CLA-1/25", "20"), test_cell("CLA-2/15", "")],
            ),
        ];
        let records = marks_from_rows(&rows, &titles);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.course_title.as_deref(), Some("Data Structures"));
        assert_eq!(record.course_type, "Theory");
        assert_eq!(record.total_max_marks, 40.0);
        assert_eq!(record.total_obtained_marks, 20.0);
        assert_eq!(record.percentage, Some(50.0));
    }

    #[test]
    fn no_tests_means_null_percentage() {
        let rows = vec![header(), marks_row("21MAB201T", "Theory", Vec::new())];
        let records = marks_from_rows(&rows, &HashMap::new());
        assert_eq!(records[0].course_title, None);
        assert_eq!(records[0].total_max_marks, 0.0);
        assert_eq!(records[0].percentage, None);
    }

    #[test]
    fn rows_without_course_code_are_skipped() {
        let rows = vec![
            header(),
            marks_row("Total", "", Vec::new()),
            marks_row("21 MAB 201T", "Theory", Vec::new()),
            vec![Cell::new("21CSC201J"), Cell::new("Theory")],
        ];
        let records = marks_from_rows(&rows, &HashMap::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course_code, "21 MAB 201T");
    }
}
