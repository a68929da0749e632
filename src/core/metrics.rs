//! Attendance safety margins.

use crate::core::text::round2;
use crate::model::attendance::AttendanceStatus;

/// Minimum attendance the university requires, in percent.
pub const DEFAULT_TARGET_PERCENTAGE: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendanceMetrics {
    pub current_percentage: f64,
    /// Hours that can still be missed while staying at or above target.
    pub can_skip: u32,
    /// Consecutive hours needed to climb back to target.
    pub need_to_attend: u32,
    pub status: AttendanceStatus,
}

/// Skips are rounded down and required hours rounded up, so neither figure
/// ever puts the student below target. Exactly one of `can_skip` and
/// `need_to_attend` can be non-zero.
pub fn compute_attendance_metrics(
    hours_present: i64,
    hours_conducted: i64,
    target_percentage: f64,
) -> AttendanceMetrics {
    let present = hours_present as f64;
    let conducted = hours_conducted as f64;

    let current_percentage = if hours_conducted > 0 {
        round2(present / conducted * 100.0)
    } else {
        0.0
    };

    let target = target_percentage / 100.0;

    if current_percentage >= target_percentage {
        let can_skip = ((present - target * conducted) / target).floor();
        AttendanceMetrics {
            current_percentage,
            can_skip: clamp_hours(can_skip),
            need_to_attend: 0,
            status: AttendanceStatus::Safe,
        }
    } else {
        let remaining = 1.0 - target;
        let need_to_attend = if remaining > 0.0 {
            ((target * conducted - present) / remaining).ceil()
        } else {
            0.0
        };
        AttendanceMetrics {
            current_percentage,
            can_skip: 0,
            need_to_attend: clamp_hours(need_to_attend),
            status: AttendanceStatus::Critical,
        }
    }
}

fn clamp_hours(hours: f64) -> u32 {
    if hours.is_finite() && hours > 0.0 {
        hours.min(u32::MAX as f64) as u32
    } else {
        0
    }
}
