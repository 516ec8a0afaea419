//! Parsing of raw catalog rows into [`Course`] values.

use super::error::CatalogError;
use crate::schedule::{Course, TimeInterval};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::LazyLock;

// Static patterns - compiled once
static DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[월화수목금토일]").unwrap());
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}):(\d{2})~(\d{1,2}):(\d{2})").unwrap());
static CREDITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)\s*:\s*(\d+\.\d+)\s*:\s*(\d+\.\d+)").unwrap());

/// One row of the catalog export, keyed by the export's column names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalogRecord {
    #[serde(rename = "교과목코드")]
    pub code: String,
    #[serde(rename = "분반", default)]
    pub section: Option<String>,
    #[serde(rename = "교과목명", default)]
    pub name: Option<String>,
    #[serde(rename = "개설학과", default)]
    pub department: Option<String>,
    #[serde(rename = "담당교수", default)]
    pub instructor: Option<String>,
    /// Lecture:lab:credit triple, e.g. `"3.0 : 0.0 : 3.0"`
    #[serde(rename = "강 : 실 : 학", default)]
    pub credit_triple: Option<String>,
    #[serde(rename = "강의유형", default)]
    pub lecture_type: Option<String>,
    #[serde(rename = "과목구분", default)]
    pub category: Option<String>,
    /// Newline-separated meeting times, e.g. `"월 10:30~12:00\n수 10:30~12:00"`
    #[serde(rename = "강의시간", default)]
    pub schedule: Option<String>,
    #[serde(rename = "강의실", default)]
    pub room: Option<String>,
    #[serde(rename = "정원", default, deserialize_with = "de_count")]
    pub capacity: u32,
    #[serde(rename = "수강인원", default, deserialize_with = "de_count")]
    pub enrolled: u32,
    #[serde(rename = "영어", default)]
    pub english: Option<String>,
    #[serde(rename = "비고", default)]
    pub note: Option<String>,
    #[serde(rename = "개설학기", default)]
    pub semester: Option<String>,
}

/// Accepts counts exported either as numbers or as numeric strings.
/// Float counts such as `120.0` are truncated and out-of-range values saturate.
fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
            None => n.as_f64().map(|f| f as u32).unwrap_or(0),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as u32))
                .unwrap_or(0)
        }
        _ => 0,
    })
}

/// Maps a Korean weekday character to a day index (Monday = 0).
fn day_index(day: &str) -> Option<u8> {
    match day {
        "월" => Some(0),
        "화" => Some(1),
        "수" => Some(2),
        "목" => Some(3),
        "금" => Some(4),
        "토" => Some(5),
        "일" => Some(6),
        _ => None,
    }
}

/// Parses schedule text into meeting intervals.
///
/// Each line contributes one interval when it contains both a weekday
/// character and an `H:MM~H:MM` range; other lines are ignored.
pub fn parse_schedule(text: &str) -> Result<Vec<TimeInterval>, CatalogError> {
    let mut intervals = Vec::new();

    for line in text.lines() {
        let Some(day) = DAY_REGEX
            .find(line)
            .and_then(|m| day_index(m.as_str()))
        else {
            continue;
        };
        let Some(caps) = TIME_REGEX.captures(line) else {
            continue;
        };

        let num = |i: usize| -> u16 { caps[i].parse().unwrap_or(0) };
        let interval = TimeInterval::from_hm(day, num(1), num(2), num(3), num(4)).map_err(
            |source| CatalogError::InvalidSchedule {
                line: line.trim().to_string(),
                source,
            },
        )?;
        intervals.push(interval);
    }

    Ok(intervals)
}

/// Extracts the credit value (third number) from a lecture:lab:credit triple.
/// Missing or malformed text counts as zero credits.
pub fn parse_credits(text: &str) -> f32 {
    CREDITS_REGEX
        .captures(text)
        .and_then(|caps| caps.get(3))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

impl RawCatalogRecord {
    /// Converts the row at position `index` into a course.
    ///
    /// The id combines code, section and index so repeated offerings of the
    /// same code and section stay distinct.
    pub fn into_course(self, index: usize) -> Result<Course, CatalogError> {
        let intervals = parse_schedule(self.schedule.as_deref().unwrap_or(""))?;
        let credits = parse_credits(self.credit_triple.as_deref().unwrap_or(""));
        let section = self.section.unwrap_or_default();

        Ok(Course {
            id: format!("{}-{}-{}", self.code, section, index),
            code: self.code,
            name: self.name.unwrap_or_default(),
            section,
            intervals,
            credits,
            instructor: self.instructor.unwrap_or_default(),
            room: self.room.unwrap_or_default(),
            department: self.department.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            lecture_type: self.lecture_type.unwrap_or_default(),
            is_english: self.english.as_deref() == Some("Y"),
            capacity: self.capacity,
            enrolled: self.enrolled,
            note: self.note.unwrap_or_default(),
            semester: self.semester.filter(|s| !s.trim().is_empty()),
        })
    }
}
