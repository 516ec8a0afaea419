//! Course offering types

use super::interval::TimeInterval;
use serde::{Deserialize, Serialize};

/// A single catalog offering (course code + section) with its weekly meetings.
///
/// Only `id`, `intervals` and `credits` take part in conflict detection and
/// layout; the remaining fields are carried along for display and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub section: String,
    pub intervals: Vec<TimeInterval>,
    pub credits: f32,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub lecture_type: String,
    #[serde(default)]
    pub is_english: bool,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: u32,
    #[serde(default)]
    pub note: String,
    /// Catalog semester label, `None` when the source row has none
    #[serde(default)]
    pub semester: Option<String>,
}

impl Course {
    /// Creates a course with the fields the scheduling core needs; the
    /// descriptive fields start empty.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        intervals: Vec<TimeInterval>,
        credits: f32,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: String::new(),
            section: String::new(),
            intervals,
            credits,
            instructor: String::new(),
            room: String::new(),
            department: String::new(),
            category: String::new(),
            lecture_type: String::new(),
            is_english: false,
            capacity: 0,
            enrolled: 0,
            note: String::new(),
            semester: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn english(mut self, is_english: bool) -> Self {
        self.is_english = is_english;
        self
    }
}
