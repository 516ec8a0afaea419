//! Timetable core: weekly intervals, conflict detection and the selection store.

mod conflict;
mod course;
mod error;
mod interval;
mod selection;

pub use conflict::{courses_conflict, find_conflicts};
pub use course::Course;
pub use error::{IntervalError, SelectionError};
pub use interval::{day_label, format_intervals, format_minutes, overlaps, TimeInterval, MAX_DAY};
pub use selection::{Added, RemovePolicy, Removed, SelectionStore};
