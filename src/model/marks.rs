use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TestScore {
    #[serde(rename = "testName")]
    pub test_name: String,

    #[serde(rename = "maxMarks")]
    pub max_marks: f64,

    /// `None` when the cell holds no mark yet.
    #[serde(rename = "obtainedMarks")]
    pub obtained_marks: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct InternalMarksRecord {
    #[serde(rename = "courseCode")]
    pub course_code: String,

    #[serde(rename = "courseTitle")]
    pub course_title: Option<String>,

    #[serde(rename = "courseType")]
    pub course_type: String,

    #[serde(rename = "tests")]
    pub tests: Vec<TestScore>,

    #[serde(rename = "totalMaxMarks")]
    pub total_max_marks: f64,

    #[serde(rename = "totalObtainedMarks")]
    pub total_obtained_marks: f64,

    #[serde(rename = "percentage")]
    pub percentage: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct InternalMarksReport {
    #[serde(rename = "internalMarks")]
    pub internal_marks: Vec<InternalMarksRecord>,
}
