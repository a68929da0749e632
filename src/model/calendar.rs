use serde::Serialize;

use crate::model::ordered_map::OrderedMap;

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct CalendarEvent {
    pub date: String,
    pub event: String,
}

#[derive(Clone, Serialize, Debug, Default, PartialEq)]
pub struct AcademicCalendar {
    pub title: String,
    pub college: String,
    pub institute: String,
    pub note: String,
    /// Symbol printed in the planner → its meaning.
    pub legend: OrderedMap<String>,
    /// Month caption → events in page order.
    pub events: OrderedMap<Vec<CalendarEvent>>,
}
