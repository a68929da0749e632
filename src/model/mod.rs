pub mod attendance;
pub mod calendar;
pub mod envelope;
pub mod marks;
pub mod ordered_map;
pub mod profile;
pub mod timetable;
