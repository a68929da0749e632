//! Scrapes the university academic portal (attendance, internal marks,
//! timetable, academic planner, student profile) into JSON-ready records.

pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod model;
pub mod utils;
