use serde::Serialize;

use crate::model::ordered_map::OrderedMap;

#[derive(Clone, Serialize, Debug, Default, PartialEq, Eq)]
pub struct Advisor {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Serialize, Debug, Default, PartialEq, Eq)]
pub struct Advisors {
    #[serde(rename = "facultyAdvisor", skip_serializing_if = "Option::is_none")]
    pub faculty_advisor: Option<Advisor>,

    #[serde(rename = "academicAdvisor", skip_serializing_if = "Option::is_none")]
    pub academic_advisor: Option<Advisor>,
}

#[derive(Clone, Serialize, Debug, Default, PartialEq)]
pub struct StudentProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "registrationNumber", skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(rename = "studentDetails")]
    pub student_details: OrderedMap<String>,

    pub advisors: Advisors,
}
