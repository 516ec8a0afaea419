//! Course catalog loading and search.
//!
//! This is the data-loading boundary: raw export rows are validated and
//! normalized here so the scheduling core only ever sees well-formed
//! [`Course`] values.

mod error;
mod parse;
mod search;

pub use error::CatalogError;
pub use parse::{parse_credits, parse_schedule, RawCatalogRecord};
pub use search::{filter_options, matches_query, search, FilterOptions, SearchFilters, Semester, ALL};

use crate::schedule::Course;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// In-memory list of every offering that can be added to a timetable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Wraps already-normalized courses.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Converts raw rows, skipping rows with unusable meeting times.
    pub fn from_records(records: Vec<RawCatalogRecord>) -> Self {
        let total = records.len();
        let courses: Vec<Course> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let code = record.code.clone();
                match record.into_course(index) {
                    Ok(course) => Some(course),
                    Err(e) => {
                        warn!("Skipping catalog row {} ({}): {}", index, code, e);
                        None
                    }
                }
            })
            .collect();

        info!("Loaded {} of {} catalog rows", courses.len(), total);
        Self { courses }
    }

    /// Parses a JSON array of catalog rows.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawCatalogRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Reads and parses a catalog JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading catalog from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Looks up an offering by id.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// First offering with the given course code.
    pub fn find_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<&Course> {
        search(&self.courses, query, filters)
    }

    pub fn filter_options(&self) -> FilterOptions {
        filter_options(&self.courses)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
