//! The student's draft timetable and its add/remove state machine.

use super::conflict::find_conflicts;
use super::course::Course;
use super::error::SelectionError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What `remove_course` does when the id is not selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Report [`SelectionError::NotFound`]
    #[default]
    Strict,
    /// Succeed without removing anything
    Lenient,
}

/// Result of a successful `add_course`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Added {
    pub course_id: String,
    pub total_credits: f32,
}

/// Result of a successful `remove_course`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Removed {
    /// The removed course, `None` when a lenient remove found nothing
    pub course: Option<Course>,
    pub total_credits: f32,
}

/// Ordered, conflict-free set of selected courses.
///
/// Every mutation goes through [`add_course`](Self::add_course),
/// [`remove_course`](Self::remove_course) or [`clear`](Self::clear). Ids are
/// unique and no two members share an overlapping meeting; a rejected add
/// leaves the set untouched.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    courses: Vec<Course>,
    remove_policy: RemovePolicy,
}

impl SelectionStore {
    /// Creates an empty store with the strict remove policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remove_policy(remove_policy: RemovePolicy) -> Self {
        Self {
            courses: Vec::new(),
            remove_policy,
        }
    }

    /// Adds a course after checking uniqueness and conflicts.
    pub fn add_course(&mut self, course: Course) -> Result<Added, SelectionError> {
        if self.contains(&course.id) {
            debug!("Rejected {}: already selected", course.id);
            return Err(SelectionError::DuplicateCourse { id: course.id });
        }

        let conflicts: Vec<Course> = find_conflicts(&course, &self.courses)
            .into_iter()
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            debug!(
                "Rejected {}: conflicts with {} selected course(s)",
                course.id,
                conflicts.len()
            );
            return Err(SelectionError::ScheduleConflict {
                id: course.id,
                conflicts,
            });
        }

        let course_id = course.id.clone();
        self.courses.push(course);
        debug!("Added {} ({} selected)", course_id, self.courses.len());

        Ok(Added {
            course_id,
            total_credits: self.total_credits(),
        })
    }

    /// Removes the course with the given id.
    pub fn remove_course(&mut self, id: &str) -> Result<Removed, SelectionError> {
        match self.courses.iter().position(|c| c.id == id) {
            Some(idx) => {
                let course = self.courses.remove(idx);
                debug!("Removed {} ({} selected)", id, self.courses.len());
                Ok(Removed {
                    course: Some(course),
                    total_credits: self.total_credits(),
                })
            }
            None => match self.remove_policy {
                RemovePolicy::Strict => Err(SelectionError::NotFound { id: id.to_string() }),
                RemovePolicy::Lenient => Ok(Removed {
                    course: None,
                    total_credits: self.total_credits(),
                }),
            },
        }
    }

    /// Empties the timetable.
    pub fn clear(&mut self) {
        self.courses.clear();
    }

    /// Sum of credits over the current members.
    pub fn total_credits(&self) -> f32 {
        self.courses.iter().map(|c| c.credits).sum()
    }

    /// Selected courses in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Members that would block `candidate`, in insertion order.
    pub fn conflicts_with(&self, candidate: &Course) -> Vec<&Course> {
        find_conflicts(candidate, &self.courses)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn remove_policy(&self) -> RemovePolicy {
        self.remove_policy
    }
}
