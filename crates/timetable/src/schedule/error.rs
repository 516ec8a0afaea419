//! Error types for the timetable core.

use super::course::Course;
use thiserror::Error;

/// A time block that cannot exist on the weekly grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// Start is not strictly before end
    #[error("Interval start {start} is not before end {end}")]
    EmptyRange { start: u16, end: u16 },

    /// Day index outside Monday..=Sunday
    #[error("Day index {day} is outside 0..=6")]
    DayOutOfRange { day: u8 },

    /// Hour/minute pair that is not a time of day
    #[error("{hour}:{minute:02} is not a valid time of day")]
    InvalidClockTime { hour: u16, minute: u16 },
}

/// Rejections produced by the selection store.
#[derive(Debug, Error, Clone)]
pub enum SelectionError {
    /// The course id is already part of the timetable
    #[error("Course {id} is already in the timetable")]
    DuplicateCourse { id: String },

    /// The course overlaps one or more selected courses
    #[error("Course {id} conflicts with {}", conflict_codes(.conflicts))]
    ScheduleConflict { id: String, conflicts: Vec<Course> },

    /// No selected course has this id
    #[error("Course {id} is not in the timetable")]
    NotFound { id: String },
}

fn conflict_codes(conflicts: &[Course]) -> String {
    conflicts
        .iter()
        .map(|c| c.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SelectionError {
    /// Returns true if the rejection was caused by a time overlap.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SelectionError::ScheduleConflict { .. })
    }

    /// Courses blocking the addition, empty for other variants.
    pub fn conflicting_courses(&self) -> &[Course] {
        match self {
            SelectionError::ScheduleConflict { conflicts, .. } => conflicts,
            _ => &[],
        }
    }
}
