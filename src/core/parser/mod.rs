//! Page parsers. Each reads one portal page into typed records and skips
//! rows that do not have the expected shape.

pub mod attendance;
pub mod calendar;
pub mod marks;
pub mod profile;
pub mod timetable;
