use serde::Serialize;

use crate::model::ordered_map::OrderedMap;

/// One row of the registered-courses table, keyed by canonical field name
/// (`courseCode`, `slot`, ...) or the normalized header for unknown columns.
pub type RegisteredCourse = OrderedMap<String>;

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct SlotCourse {
    #[serde(rename = "courseCode", skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,

    #[serde(rename = "courseTitle", skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,

    #[serde(rename = "facultyName", skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,

    #[serde(rename = "roomNo", skip_serializing_if = "Option::is_none")]
    pub room_no: Option<String>,

    #[serde(rename = "category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "regType", skip_serializing_if = "Option::is_none")]
    pub reg_type: Option<String>,
}

impl From<&RegisteredCourse> for SlotCourse {
    fn from(course: &RegisteredCourse) -> Self {
        let field = |name: &str| course.get(name).cloned();
        SlotCourse {
            course_code: field("courseCode"),
            course_title: field("courseTitle"),
            faculty_name: field("facultyName"),
            room_no: field("roomNo"),
            category: field("category"),
            reg_type: field("regType"),
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct TimetableSlotEntry {
    #[serde(rename = "dayOrder")]
    pub day_order: String,

    pub time: String,

    pub slot: String,

    pub course: Option<SlotCourse>,
}

/// Everything read from the timetable page.
#[derive(Clone, Serialize, Debug, Default, PartialEq)]
pub struct Timetable {
    #[serde(rename = "studentDetails")]
    pub student_details: OrderedMap<String>,

    pub batch: Option<String>,

    pub courses: Vec<RegisteredCourse>,

    /// Slot entries that have a course attached.
    pub slots: Vec<TimetableSlotEntry>,
}
