//! Fixed weekly period grids for the two timetable batches.

use std::collections::HashMap;

use crate::model::timetable::{RegisteredCourse, SlotCourse, TimetableSlotEntry};

pub const SLOT_TIMES: [&str; 10] = [
    "08:00-08:50",
    "08:50-09:40",
    "09:45-10:35",
    "10:40-11:30",
    "11:35-12:25",
    "12:30-13:20",
    "13:25-14:15",
    "14:20-15:10",
    "15:10-16:00",
    "16:00-16:50",
];

pub type DayGrid = [&'static str; 10];

const BATCH_1: [DayGrid; 5] = [
    ["A", "A", "F", "F", "G", "P6", "P7", "P8", "P9", "P10"],
    ["P11", "P12", "P13", "P14", "P15", "B", "B", "G", "G", "A"],
    ["C", "C", "A", "D", "B", "P26", "P27", "P28", "P29", "P30"],
    ["P31", "P32", "P33", "P34", "P35", "D", "D", "B", "E", "C"],
    ["E", "E", "C", "F", "D", "P46", "P47", "P48", "P49", "P50"],
];

const BATCH_2: [DayGrid; 5] = [
    ["P1", "P2", "P3", "P4", "P5", "A", "A", "F", "F", "G"],
    ["B", "B", "G", "G", "A", "P16", "P17", "P18", "P19", "P20"],
    ["P21", "P22", "P23", "P24", "P25", "C", "C", "A", "D", "B"],
    ["D", "D", "B", "E", "C", "P36", "P37", "P38", "P39", "P40"],
    ["P41", "P42", "P43", "P44", "P45", "E", "E", "C", "F", "D"],
];

/// Day-order grid for a batch label, `None` for anything but "1" and "2".
pub fn batch_grid(batch: &str) -> Option<&'static [DayGrid; 5]> {
    match batch {
        "1" => Some(&BATCH_1),
        "2" => Some(&BATCH_2),
        _ => None,
    }
}

/// Maps every slot code named in a course's `slot` field to that course.
/// Codes are separated by `,`, `/` or `-`; a later course wins a shared code.
pub fn slot_lookup(courses: &[RegisteredCourse]) -> HashMap<&str, &RegisteredCourse> {
    let mut lookup = HashMap::new();
    for course in courses {
        let Some(slot) = course.get("slot") else {
            continue;
        };
        for code in slot.split([',', '/', '-']).map(str::trim) {
            if !code.is_empty() {
                lookup.insert(code, course);
            }
        }
    }
    lookup
}

/// One entry per (day, period) of the batch grid, with the course occupying
/// that slot if any. Unknown batches produce no entries.
pub fn expand(batch: &str, courses: &[RegisteredCourse]) -> Vec<TimetableSlotEntry> {
    let Some(grid) = batch_grid(batch) else {
        return Vec::new();
    };
    let lookup = slot_lookup(courses);

    grid.iter()
        .enumerate()
        .flat_map(|(day, slots)| {
            let lookup = &lookup;
            slots.iter().zip(SLOT_TIMES).map(move |(slot, time)| TimetableSlotEntry {
                day_order: format!("Day {}", day + 1),
                time: time.to_string(),
                slot: slot.to_string(),
                course: lookup.get(slot).map(|course| SlotCourse::from(*course)),
            })
        })
        .collect()
}
