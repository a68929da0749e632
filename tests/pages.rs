use academia_scrape::core::metrics::DEFAULT_TARGET_PERCENTAGE;
use academia_scrape::core::scrape::{
    read_attendance, read_calendar, read_internal_marks, read_profile, read_timetable,
};
use academia_scrape::error::{PageError, StructureReason};
use academia_scrape::model::attendance::AttendanceStatus;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

const ATTENDANCE_PAGE: &str = include_str!("fixtures/attendance_page.html");
const TIMETABLE_PAGE: &str = include_str!("fixtures/timetable_page.html");
const PLANNER_PAGE: &str = include_str!("fixtures/planner_page.html");
const PLANNER_UNWRAPPED: &str = include_str!("fixtures/planner_unwrapped.html");
const LOGIN_PAGE: &str = include_str!("fixtures/login_page.html");

#[test]
fn attendance_page_yields_courses_with_metrics() {
    let report = read_attendance(ATTENDANCE_PAGE, DEFAULT_TARGET_PERCENTAGE).unwrap();
    assert_eq!(report.courses.len(), 2);

    let dsa = &report.courses[0];
    assert_eq!(dsa.course_code, "21CSC201J");
    assert_eq!(dsa.course_type, "Regular");
    assert_eq!(dsa.course_title, "Data Structures and Algorithms");
    assert_eq!(dsa.faculty_name, "Dr. Rao (101234)");
    assert_eq!(dsa.hours_present, 37);
    assert_eq!(dsa.attendance_percentage, 92.5);
    assert_eq!(dsa.can_skip, 9);
    assert_eq!(dsa.status, AttendanceStatus::Safe);

    let maths = &report.courses[1];
    assert_eq!(maths.hours_present, 20);
    assert_eq!(maths.need_to_attend, 40);
    assert_eq!(maths.status, AttendanceStatus::Critical);

    for course in &report.courses {
        assert_eq!(course.hours_present + course.hours_absent, course.hours_conducted);
        assert!(course.can_skip == 0 || course.need_to_attend == 0);
    }
}

#[test]
fn attendance_json_uses_portal_field_names() {
    let report = read_attendance(ATTENDANCE_PAGE, DEFAULT_TARGET_PERCENTAGE).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value["courses"][1],
        json!({
            "courseCode": "21MAB201T",
            "courseType": "Regular",
            "courseTitle": "Transforms and Boundary Value Problems",
            "category": "Basic Science",
            "facultyName": "Dr. Iyer",
            "roomNo": "TP 205",
            "hoursConducted": 40,
            "hoursPresent": 20,
            "hoursAbsent": 20,
            "attendancePercentage": 50.0,
            "canSkip": 0,
            "needToAttend": 40,
            "status": "critical"
        })
    );
}

#[test]
fn marks_come_from_second_table_with_titles_from_attendance() {
    let report = read_internal_marks(ATTENDANCE_PAGE).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value,
        json!({
            "internalMarks": [
                {
                    "courseCode": "21CSC201J",
                    "courseTitle": "Data Structures and Algorithms",
                    "courseType": "Theory",
                    "tests": [
                        {"testName": "CLA-1", "maxMarks": 25.0, "obtainedMarks": 20.5},
                        {"testName": "CLA-2", "maxMarks": 15.0, "obtainedMarks": null}
                    ],
                    "totalMaxMarks": 40.0,
                    "totalObtainedMarks": 20.5,
                    "percentage": 51.25
                },
                {
                    "courseCode": "21MAB201T",
                    "courseTitle": "Transforms and Boundary Value Problems",
                    "courseType": "Theory",
                    "tests": [],
                    "totalMaxMarks": 0.0,
                    "totalObtainedMarks": 0.0,
                    "percentage": null
                }
            ]
        })
    );
}

#[test]
fn timetable_maps_batch_two_slots() {
    let timetable = read_timetable(TIMETABLE_PAGE).unwrap();
    assert_eq!(timetable.batch.as_deref(), Some("2"));
    assert_eq!(timetable.courses.len(), 2);
    assert_eq!(
        timetable.student_details.get("Registration Number").map(String::as_str),
        Some("RA2211003010001")
    );

    let placed: Vec<(&str, &str, &str)> = timetable
        .slots
        .iter()
        .map(|entry| (entry.day_order.as_str(), entry.time.as_str(), entry.slot.as_str()))
        .collect();
    assert_eq!(
        placed,
        vec![
            ("Day 1", "08:00-08:50", "P1"),
            ("Day 1", "08:50-09:40", "P2"),
            ("Day 1", "12:30-13:20", "A"),
            ("Day 1", "13:25-14:15", "A"),
            ("Day 2", "11:35-12:25", "A"),
            ("Day 3", "14:20-15:10", "A"),
        ]
    );

    let value = serde_json::to_value(&timetable.slots[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "dayOrder": "Day 1",
            "time": "08:00-08:50",
            "slot": "P1",
            "course": {
                "courseCode": "21CSC202L",
                "courseTitle": "DSA Lab",
                "facultyName": "Dr. Rao",
                "roomNo": "TP Lab 3",
                "category": "Professional Core",
                "regType": "Regular"
            }
        })
    );
}

#[test]
fn profile_reads_details_and_advisors() {
    let profile = read_profile(TIMETABLE_PAGE).unwrap();
    assert_eq!(profile.name.as_deref(), Some("Asha K"));
    assert_eq!(profile.registration_number.as_deref(), Some("RA2211003010001"));
    assert_eq!(profile.department.as_deref(), Some("Computer Science and Engineering"));
    assert_eq!(profile.semester.as_deref(), Some("5"));
    assert_eq!(profile.email, None);

    let faculty = profile.advisors.faculty_advisor.as_ref().unwrap();
    assert_eq!(faculty.name, "Dr. Meena");
    assert_eq!(faculty.phone, "9876543210");
    assert_eq!(
        profile.advisors.academic_advisor.as_ref().map(|a| a.email.as_str()),
        Some("arul@srmist.edu.in")
    );
}

#[rstest]
#[case::sanitized(PLANNER_PAGE)]
#[case::unwrapped(PLANNER_UNWRAPPED)]
fn planner_is_read_with_or_without_sanitizer(#[case] raw: &str) {
    let calendar = read_calendar(raw).unwrap();
    let value = serde_json::to_value(&calendar).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Academic Planner 2025-26 ODD",
            "college": "SRM Institute of Science and Technology",
            "institute": "Kattankulathur",
            "note": "Dates are subject to change.",
            "legend": {"*": "Holiday", "DO": "Day Order"},
            "events": {
                "Jul '25": [
                    {"date": "1", "event": "Enrollment day"},
                    {"date": "15", "event": "Orientation & Induction"}
                ],
                "Aug '25": [
                    {"date": "15", "event": "Independence Day - Holiday"}
                ]
            }
        })
    );
}

#[test]
fn month_order_follows_the_page() {
    let calendar = read_calendar(PLANNER_PAGE).unwrap();
    assert_eq!(calendar.events.keys().collect::<Vec<_>>(), vec!["Jul '25", "Aug '25"]);
}

#[test]
fn login_page_is_reported_as_expired_session() {
    let expected = PageError::StructureNotFound {
        page: "attendance",
        reason: StructureReason::SessionExpired,
    };
    assert_eq!(
        read_attendance(LOGIN_PAGE, DEFAULT_TARGET_PERCENTAGE).unwrap_err(),
        expected
    );
    assert!(read_calendar(LOGIN_PAGE).is_err());
    assert_eq!(read_timetable(LOGIN_PAGE).unwrap_err().http_status(), 401);
}

#[test]
fn page_without_records_is_empty_not_an_error() {
    let raw = r#"pageSanitizer.sanitize('<div class=\"cntdDiv\"><p>No records</p></div>');"#;
    assert!(read_attendance(raw, DEFAULT_TARGET_PERCENTAGE).unwrap().courses.is_empty());
    assert!(read_internal_marks(raw).unwrap().internal_marks.is_empty());
    assert!(read_timetable(raw).unwrap().slots.is_empty());
}
