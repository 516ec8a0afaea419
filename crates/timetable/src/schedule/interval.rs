//! Weekly recurring time blocks.

use super::error::IntervalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest day index accepted by [`TimeInterval::new`] (Sunday, Monday = 0).
pub const MAX_DAY: u8 = 6;

const MINUTES_PER_DAY: u16 = 24 * 60;

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One weekly occurrence of a course: a day of the week plus a half-open
/// minute range `[start, end)` measured from midnight.
///
/// Construction validates `start < end` and `day <= 6`, so every value of
/// this type is well-formed and the fields are read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    day: u8,
    start: u16,
    end: u16,
}

/// Unvalidated wire shape, checked by `TryFrom` on deserialization.
#[derive(Deserialize)]
struct RawInterval {
    day: u8,
    start: u16,
    end: u16,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = IntervalError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        TimeInterval::new(raw.day, raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Creates an interval from minute-of-day bounds.
    pub fn new(day: u8, start: u16, end: u16) -> Result<Self, IntervalError> {
        if day > MAX_DAY {
            return Err(IntervalError::DayOutOfRange { day });
        }
        if start >= end {
            return Err(IntervalError::EmptyRange { start, end });
        }
        Ok(Self { day, start, end })
    }

    /// Creates an interval from hour/minute pairs, e.g. `(0, 9, 0, 10, 15)`
    /// for Monday 9:00 to 10:15. Times run from 0:00 up to 24:00.
    pub fn from_hm(
        day: u8,
        start_hour: u16,
        start_min: u16,
        end_hour: u16,
        end_min: u16,
    ) -> Result<Self, IntervalError> {
        Self::new(
            day,
            clock_minutes(start_hour, start_min)?,
            clock_minutes(end_hour, end_min)?,
        )
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Length of the block in minutes.
    pub fn duration(&self) -> u16 {
        self.end - self.start
    }

    /// Returns true if both intervals fall on the same day and their
    /// half-open ranges intersect. Back-to-back blocks do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        if self.day != other.day {
            return false;
        }
        !(self.end <= other.start || other.end <= self.start)
    }
}

/// Converts a wall-clock time to minutes since midnight.
fn clock_minutes(hour: u16, minute: u16) -> Result<u16, IntervalError> {
    let invalid = IntervalError::InvalidClockTime { hour, minute };
    if minute >= 60 {
        return Err(invalid);
    }
    match hour.checked_mul(60).and_then(|m| m.checked_add(minute)) {
        Some(total) if total <= MINUTES_PER_DAY => Ok(total),
        _ => Err(invalid),
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}~{}",
            day_label(self.day).unwrap_or("?"),
            format_minutes(self.start),
            format_minutes(self.end)
        )
    }
}

/// Free-function form of [`TimeInterval::overlaps`].
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.overlaps(b)
}

/// Formats minutes since midnight as zero-padded `HH:MM`.
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Short English label for a day index (Monday = 0).
pub fn day_label(day: u8) -> Option<&'static str> {
    DAY_LABELS.get(day as usize).copied()
}

/// Renders a course's meeting times, e.g. `"Mon 10:30~12:00, Wed 10:30~12:00"`.
pub fn format_intervals(intervals: &[TimeInterval]) -> String {
    intervals
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(day: u8, start: u16, end: u16) -> TimeInterval {
        TimeInterval::new(day, start, end).unwrap()
    }

    #[test]
    fn test_back_to_back_is_not_overlap() {
        assert!(!overlaps(&iv(0, 540, 600), &iv(0, 600, 660)));
        assert!(!overlaps(&iv(0, 600, 660), &iv(0, 540, 600)));
    }

    #[test]
    fn test_partial_overlap_same_day() {
        assert!(overlaps(&iv(0, 540, 600), &iv(0, 570, 630)));
    }

    #[test]
    fn test_containment_overlaps() {
        assert!(overlaps(&iv(2, 540, 720), &iv(2, 600, 630)));
        assert!(overlaps(&iv(2, 600, 630), &iv(2, 540, 720)));
    }

    #[test]
    fn test_different_day_never_overlaps() {
        assert!(!overlaps(&iv(0, 540, 600), &iv(1, 540, 600)));
        assert!(!overlaps(&iv(0, 0, 1439), &iv(1, 0, 1439)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let samples = [
            iv(0, 540, 600),
            iv(0, 570, 630),
            iv(0, 600, 660),
            iv(1, 540, 600),
            iv(0, 500, 700),
            iv(4, 1200, 1260),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(overlaps(a, b), overlaps(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_rejects_malformed_intervals() {
        assert!(matches!(
            TimeInterval::new(0, 600, 600),
            Err(IntervalError::EmptyRange { start: 600, end: 600 })
        ));
        assert!(matches!(
            TimeInterval::new(0, 660, 600),
            Err(IntervalError::EmptyRange { .. })
        ));
        assert!(matches!(
            TimeInterval::new(7, 540, 600),
            Err(IntervalError::DayOutOfRange { day: 7 })
        ));
    }

    #[test]
    fn test_from_hm_and_display() {
        let i = TimeInterval::from_hm(2, 10, 30, 12, 0).unwrap();
        assert_eq!(i.start(), 630);
        assert_eq!(i.end(), 720);
        assert_eq!(i.duration(), 90);
        assert_eq!(i.to_string(), "Wed 10:30~12:00");
    }

    #[test]
    fn test_from_hm_rejects_invalid_clock_times() {
        assert!(matches!(
            TimeInterval::from_hm(0, 1100, 0, 1101, 0),
            Err(IntervalError::InvalidClockTime { hour: 1100, minute: 0 })
        ));
        assert!(matches!(
            TimeInterval::from_hm(0, 9, 75, 11, 0),
            Err(IntervalError::InvalidClockTime { hour: 9, minute: 75 })
        ));
        assert!(matches!(
            TimeInterval::from_hm(0, 23, 0, 25, 0),
            Err(IntervalError::InvalidClockTime { hour: 25, .. })
        ));
        assert!(matches!(
            TimeInterval::from_hm(0, 9, 0, u16::MAX, u16::MAX),
            Err(IntervalError::InvalidClockTime { .. })
        ));

        let late = TimeInterval::from_hm(6, 23, 0, 24, 0).unwrap();
        assert_eq!(late.end(), 1440);
    }

    #[test]
    fn test_format_intervals() {
        let times = [iv(0, 630, 720), iv(2, 630, 720)];
        assert_eq!(
            format_intervals(&times),
            "Mon 10:30~12:00, Wed 10:30~12:00"
        );
        assert_eq!(format_intervals(&[]), "");
        assert_eq!(format_minutes(545), "09:05");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TimeInterval =
            serde_json::from_str(r#"{"day":1,"start":540,"end":615}"#).unwrap();
        assert_eq!(ok, iv(1, 540, 615));

        let bad = serde_json::from_str::<TimeInterval>(r#"{"day":1,"start":615,"end":540}"#);
        assert!(bad.is_err());
    }
}
