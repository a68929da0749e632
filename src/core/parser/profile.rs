use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::core::parser::timetable::STUDENT_DETAILS_TABLE;
use crate::core::table::{element_text, extract_key_value_rows};
use crate::model::ordered_map::OrderedMap;
use crate::model::profile::{Advisor, Advisors, StudentProfile};

static ADVISOR_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"td[align="center"]"#).expect("advisor cell selector"));
static STRONG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong").expect("strong selector"));
static EMAIL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"font[color="blue"]"#).expect("email selector"));
static PHONE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"font[color="green"]"#).expect("phone selector"));

fn joined_text(cell: ElementRef<'_>, selector: &Selector) -> String {
    cell.select(selector)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn advisor(cell: ElementRef<'_>, strong: ElementRef<'_>) -> Advisor {
    // The name is the strong's first node; the role label follows it.
    let name = strong
        .first_child()
        .map(|node| match ElementRef::wrap(node) {
            Some(element) => element_text(element),
            None => node
                .value()
                .as_text()
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
        })
        .unwrap_or_default();

    Advisor {
        name,
        email: joined_text(cell, &EMAIL),
        phone: joined_text(cell, &PHONE),
    }
}

/// Faculty and academic advisor cards from the timetable page.
pub fn parse_advisors(document: &Html) -> Advisors {
    let mut advisors = Advisors::default();
    for cell in document.select(&ADVISOR_CELL) {
        let Some(strong) = cell.select(&STRONG).next() else {
            continue;
        };
        let label = strong.inner_html();
        if label.contains("Faculty Advisor") {
            advisors.faculty_advisor = Some(advisor(cell, strong));
        } else if label.contains("Academic Advisor") {
            advisors.academic_advisor = Some(advisor(cell, strong));
        }
    }
    advisors
}

pub fn profile_from_details(details: OrderedMap<String>, advisors: Advisors) -> StudentProfile {
    let pick = |keys: &[&str]| details.first_of(keys).map(str::to_string);
    StudentProfile {
        name: pick(&["Name", "Student Name"]),
        email: pick(&["Email Id", "Email"]),
        registration_number: pick(&["Registration Number", "Reg. No."]),
        department: pick(&["Department"]),
        batch: pick(&["Batch"]),
        semester: pick(&["Semester", "Current Semester"]),
        section: pick(&["Section"]),
        advisors,
        student_details: details,
    }
}

/// Student profile from the timetable page.
pub fn parse_profile(document: &Html) -> StudentProfile {
    let details = extract_key_value_rows(document, &STUDENT_DETAILS_TABLE);
    profile_from_details(details, parse_advisors(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn advisors_are_read_from_labelled_cards() {
        let document = Html::parse_document(
            r#"<table><tr>
            <td align="center"><strong>Dr. Meena<br>Faculty Advisor</strong><br>
              <font color="blue">meena@univ.edu</font><br><font color="green">9876543210</font></td>
            <td align="center"><strong>Dr. Arul<br>Academic Advisor</strong>
              <font color="blue">arul@univ.edu</font></td>
            <td align="center">no card</td>
            </tr></table>"#,
        );
        let advisors = parse_advisors(&document);
        assert_eq!(
            advisors.faculty_advisor,
            Some(Advisor {
                name: "Dr. Meena".into(),
                email: "meena@univ.edu".into(),
                phone: "9876543210".into(),
            })
        );
        let academic = advisors.academic_advisor.unwrap();
        assert_eq!(academic.name, "Dr. Arul");
        assert_eq!(academic.phone, "");
    }

    #[test]
    fn profile_reads_label_variants() {
        let details: OrderedMap<String> = [
            ("Student Name", "Asha"),
            ("Reg. No.", "RA2211003010001"),
            ("Current Semester", "5"),
            ("Batch", "2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let profile = profile_from_details(details, Advisors::default());
        assert_eq!(profile.name.as_deref(), Some("Asha"));
        assert_eq!(profile.registration_number.as_deref(), Some("RA2211003010001"));
        assert_eq!(profile.semester.as_deref(), Some("5"));
        assert_eq!(profile.batch.as_deref(), Some("2"));
        assert_eq!(profile.email, None);
        assert_eq!(profile.student_details.len(), 4);
    }
}
