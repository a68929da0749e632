use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Safe,
    Critical,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AttendanceRecord {
    #[serde(rename = "courseCode")]
    pub course_code: String,

    #[serde(rename = "courseType")]
    pub course_type: String,

    #[serde(rename = "courseTitle")]
    pub course_title: String,

    #[serde(rename = "category")]
    pub category: String,

    #[serde(rename = "facultyName")]
    pub faculty_name: String,

    #[serde(rename = "roomNo")]
    pub room_no: String,

    #[serde(rename = "hoursConducted")]
    pub hours_conducted: i64,

    #[serde(rename = "hoursPresent")]
    pub hours_present: i64,

    #[serde(rename = "hoursAbsent")]
    pub hours_absent: i64,

    /// As printed by the portal, not recomputed from the hours.
    #[serde(rename = "attendancePercentage")]
    pub attendance_percentage: f64,

    #[serde(rename = "canSkip")]
    pub can_skip: u32,

    #[serde(rename = "needToAttend")]
    pub need_to_attend: u32,

    #[serde(rename = "status")]
    pub status: AttendanceStatus,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AttendanceReport {
    pub courses: Vec<AttendanceRecord>,
}
