//! Raw portal response → records, one function per page.
//!
//! These are the synchronous halves of the [`Portal`](crate::core::portal::Portal)
//! operations and also back the CLI's offline `--file` mode.

use log::info;
use scraper::Html;

use crate::core::page::{Encoding, locate_html};
use crate::core::parser::{attendance, calendar, marks, profile, timetable};
use crate::error::PageError;
use crate::model::attendance::AttendanceReport;
use crate::model::calendar::AcademicCalendar;
use crate::model::marks::InternalMarksReport;
use crate::model::profile::StudentProfile;
use crate::model::timetable::Timetable;

fn document(page: &'static str, raw: &str, encoding: Encoding) -> Result<Html, PageError> {
    locate_html(page, raw, encoding).map(|html| Html::parse_document(&html))
}

pub fn read_attendance(raw: &str, target_percentage: f64) -> Result<AttendanceReport, PageError> {
    let document = document("attendance", raw, Encoding::Backslash)?;
    let courses = attendance::parse_attendance(&document, target_percentage);
    info!("attendance: {} courses", courses.len());
    Ok(AttendanceReport { courses })
}

/// Marks live on the attendance page; the same page supplies course titles.
pub fn read_internal_marks(raw: &str) -> Result<InternalMarksReport, PageError> {
    let document = document("internal marks", raw, Encoding::Backslash)?;
    let titles = attendance::course_title_map(&document);
    let internal_marks = marks::parse_internal_marks(&document, &titles);
    info!(
        "internal marks: {} courses, {} titles known",
        internal_marks.len(),
        titles.len()
    );
    Ok(InternalMarksReport { internal_marks })
}

pub fn read_timetable(raw: &str) -> Result<Timetable, PageError> {
    let document = document("timetable", raw, Encoding::Backslash)?;
    let timetable = timetable::parse_timetable(&document);
    info!(
        "timetable: batch {:?}, {} courses, {} occupied slots",
        timetable.batch,
        timetable.courses.len(),
        timetable.slots.len()
    );
    Ok(timetable)
}

pub fn read_calendar(raw: &str) -> Result<AcademicCalendar, PageError> {
    let document = document("calendar", raw, Encoding::HexEntities)?;
    let calendar = calendar::parse_calendar(&document)?;
    info!(
        "calendar: {} months, {} legend entries",
        calendar.events.len(),
        calendar.legend.len()
    );
    Ok(calendar)
}

/// The profile comes from the timetable page.
pub fn read_profile(raw: &str) -> Result<StudentProfile, PageError> {
    let document = document("profile", raw, Encoding::Backslash)?;
    Ok(profile::parse_profile(&document))
}
