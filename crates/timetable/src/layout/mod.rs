//! Grid layout engine.
//!
//! Converts the meetings of selected courses into absolutely positioned
//! blocks on a time-by-day grid. Layout is a pure function of the courses and
//! the [`GridConfig`] and is recomputed in full on every change.

mod config;

pub use config::GridConfig;

use crate::schedule::{Course, TimeInterval};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while laying out a timetable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Visible blocks of two different courses share a day and time range.
    /// The selection store never produces this, so it indicates a caller bug.
    #[error("Overlapping blocks on day {day}: {first} and {second}")]
    OverlappingIntervals {
        day: u8,
        first: String,
        second: String,
    },

    /// The grid configuration cannot be drawn
    #[error("Invalid grid config: {message}")]
    InvalidConfig { message: String },
}

/// One meeting of one course, positioned on the grid in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub course_id: String,
    /// Position of the meeting within `Course::intervals`
    pub interval_index: usize,
    pub day: u8,
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Lays out every visible meeting of `courses`.
///
/// Meetings on a day without a column, or not entirely inside the hour
/// window, are skipped rather than clipped. Output order is course order then
/// meeting order. Only meetings of different courses count as overlapping;
/// a course whose own meetings overlap is drawn as is.
pub fn layout(courses: &[Course], config: &GridConfig) -> Result<Vec<PlacedBlock>, LayoutError> {
    config.validate()?;

    let mut blocks = Vec::new();
    let mut placed: Vec<(&TimeInterval, &str)> = Vec::new();

    for course in courses {
        for (idx, interval) in course.intervals.iter().enumerate() {
            if !is_visible(interval, config) {
                debug!("Skipping {} meeting {} ({}): outside grid", course.id, idx, interval);
                continue;
            }

            if let Some((_, other)) = placed
                .iter()
                .find(|(p, owner)| *owner != course.id && p.overlaps(interval))
            {
                return Err(LayoutError::OverlappingIntervals {
                    day: interval.day(),
                    first: other.to_string(),
                    second: course.id.clone(),
                });
            }
            placed.push((interval, course.id.as_str()));

            let offset = (interval.start() - config.window_start()) as f32;
            blocks.push(PlacedBlock {
                course_id: course.id.clone(),
                interval_index: idx,
                day: interval.day(),
                top: config.header_height + offset * config.hour_height / 60.0,
                left: config.column_origin + interval.day() as f32 * config.column_width,
                width: config.column_width,
                height: interval.duration() as f32 * config.hour_height / 60.0,
            });
        }
    }

    Ok(blocks)
}

fn is_visible(interval: &TimeInterval, config: &GridConfig) -> bool {
    (interval.day() as usize) < config.day_columns.len()
        && interval.start() >= config.window_start()
        && interval.end() <= config.window_end()
}
