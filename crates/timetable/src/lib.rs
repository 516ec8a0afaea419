//! Conflict-free weekly class timetables.
//!
//! - [`schedule`]: time intervals, conflict detection and the per-student
//!   selection store.
//! - [`layout`]: placement of selected meetings on a time-by-day grid.
//! - [`catalog`]: loading, normalizing and searching course offerings.
//! - [`suggest`]: greedy credit filling and course codes from assistant replies.
//! - [`server`]: the axum HTTP API used by `timetable-server`.

pub mod catalog;
pub mod config;
pub mod layout;
pub mod schedule;
pub mod server;
pub mod suggest;
pub mod types;
