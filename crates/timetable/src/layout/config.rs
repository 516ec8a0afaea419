//! Grid geometry configuration

use super::LayoutError;
use serde::{Deserialize, Serialize};

/// Visible window and pixel geometry of the weekly grid.
///
/// Hours are whole hours since midnight; `end_hour` is the bottom edge of the
/// last row. Day columns are matched to `TimeInterval::day` by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_hour: u16,
    pub end_hour: u16,
    pub day_columns: Vec<String>,
    /// Pixels per hour of class time
    pub hour_height: f32,
    pub column_width: f32,
    /// Width of the time-label column left of the first day
    pub column_origin: f32,
    /// Height of the day-label row above the first hour
    pub header_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 21,
            day_columns: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            hour_height: 40.0,
            column_width: 120.0,
            column_origin: 45.0,
            header_height: 40.0,
        }
    }
}

impl GridConfig {
    /// Checks that the window and geometry describe a drawable grid.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(LayoutError::InvalidConfig {
                message: format!(
                    "hour window {}..{} must be increasing and end by 24",
                    self.start_hour, self.end_hour
                ),
            });
        }
        if self.day_columns.is_empty() {
            return Err(LayoutError::InvalidConfig {
                message: "at least one day column is required".to_string(),
            });
        }
        if !(self.hour_height > 0.0 && self.column_width > 0.0) {
            return Err(LayoutError::InvalidConfig {
                message: "hour height and column width must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Returns a copy whose columns evenly share `total_width` after the
    /// time-label column.
    pub fn fit_width(&self, total_width: f32) -> Self {
        let columns = self.day_columns.len().max(1) as f32;
        Self {
            column_width: ((total_width - self.column_origin) / columns).max(0.0),
            ..self.clone()
        }
    }

    /// First visible minute since midnight.
    pub fn window_start(&self) -> u16 {
        self.start_hour * 60
    }

    /// Last visible minute since midnight.
    pub fn window_end(&self) -> u16 {
        self.end_hour * 60
    }

    /// Total drawable height including the header row.
    pub fn grid_height(&self) -> f32 {
        self.header_height + (self.end_hour - self.start_hour) as f32 * self.hour_height
    }

    /// Total drawable width including the time-label column.
    pub fn grid_width(&self) -> f32 {
        self.column_origin + self.day_columns.len() as f32 * self.column_width
    }
}
