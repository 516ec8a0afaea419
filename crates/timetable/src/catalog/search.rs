//! Catalog search and filtering

use crate::schedule::Course;
use serde::{Deserialize, Serialize};

/// Filter value that matches every course.
pub const ALL: &str = "All";

/// Academic term, mapped to the catalog's own semester labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semester {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Semester {
    /// Label used by the catalog export.
    pub fn catalog_label(&self) -> &'static str {
        match self {
            Semester::Spring => "봄학기",
            Semester::Summer => "여름학기",
            Semester::Fall => "가을학기",
            Semester::Winter => "겨울학기",
        }
    }

    /// Courses without a semester label are offered in every term.
    pub fn offers(&self, course: &Course) -> bool {
        course
            .semester
            .as_deref()
            .map_or(true, |s| s == self.catalog_label())
    }
}

/// Optional search filters. `None` or `"All"` disables a filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub department: Option<String>,
    pub category: Option<String>,
    pub english: Option<bool>,
    pub semester: Option<Semester>,
}

fn field_matches(filter: Option<&str>, value: &str) -> bool {
    match filter {
        None | Some(ALL) | Some("") => true,
        Some(f) => f == value,
    }
}

impl SearchFilters {
    pub fn matches(&self, course: &Course) -> bool {
        field_matches(self.department.as_deref(), &course.department)
            && field_matches(self.category.as_deref(), &course.category)
            && self.english.map_or(true, |e| course.is_english == e)
            && self.semester.map_or(true, |s| s.offers(course))
    }
}

/// Case-insensitive substring match on code, name or instructor. An empty
/// query matches everything.
pub fn matches_query(course: &Course, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [&course.code, &course.name, &course.instructor]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Returns the courses matching both the query and the filters, in input order.
pub fn search<'a>(courses: &'a [Course], query: &str, filters: &SearchFilters) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|c| matches_query(c, query) && filters.matches(c))
        .collect()
}

/// Distinct departments and categories, each list led by `"All"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub departments: Vec<String>,
    pub categories: Vec<String>,
}

/// Collects filter choices in first-seen order.
pub fn filter_options(courses: &[Course]) -> FilterOptions {
    let mut departments = vec![ALL.to_string()];
    let mut categories = vec![ALL.to_string()];

    for course in courses {
        if !departments.contains(&course.department) {
            departments.push(course.department.clone());
        }
        if !categories.contains(&course.category) {
            categories.push(course.category.clone());
        }
    }

    FilterOptions {
        departments,
        categories,
    }
}
