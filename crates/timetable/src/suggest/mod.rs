//! Schedule suggestions.
//!
//! Two sources feed the selection store the same way a manual add does: a
//! greedy credit filler over the catalog, and course codes extracted from an
//! assistant's reply. Neither bypasses [`SelectionStore::add_course`].

mod extract;

pub use extract::extract_course_codes;

use crate::catalog::Semester;
use crate::schedule::{courses_conflict, Course, SelectionError, SelectionStore};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Category that counts as relevant to every major.
pub const BASIC_REQUIRED: &str = "기초필수";

/// Classes starting before this minute count as morning classes.
const MORNING_CUTOFF: u16 = 10 * 60;

/// Student preferences used to filter candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Department to favour; basic-required courses always qualify
    pub major: Option<String>,
    pub prefer_english: bool,
    pub avoid_morning: bool,
    /// Day indices (Monday = 0); a course needs at least one meeting on one
    pub preferred_days: Vec<u8>,
    /// Credit goal for the whole timetable, `None` to use the configured one
    pub target_credits: Option<f32>,
    /// Term being planned; courses offered in other terms are skipped
    pub semester: Option<Semester>,
}

impl Preferences {
    /// Returns true if `course` passes every preference filter.
    pub fn accepts(&self, course: &Course) -> bool {
        if self.semester.is_some_and(|s| !s.offers(course)) {
            return false;
        }
        if let Some(major) = self.major.as_deref().filter(|m| !m.is_empty()) {
            if course.department != major && course.category != BASIC_REQUIRED {
                return false;
            }
        }
        if self.prefer_english && !course.is_english {
            return false;
        }
        if self.avoid_morning && course.intervals.iter().any(|i| i.start() < MORNING_CUTOFF) {
            return false;
        }
        if !self.preferred_days.is_empty()
            && !course
                .intervals
                .iter()
                .any(|i| self.preferred_days.contains(&i.day()))
        {
            return false;
        }
        true
    }
}

/// Picks up to `max_suggestions` candidates that fit the remaining credit
/// budget, in random order.
///
/// Candidates already selected or conflicting with the current selection are
/// dropped. Suggestions are not checked against each other, so applying them
/// can still reject some.
pub fn recommend<R: Rng + ?Sized>(
    candidates: &[Course],
    selection: &SelectionStore,
    prefs: &Preferences,
    target_credits: f32,
    max_suggestions: usize,
    rng: &mut R,
) -> Vec<Course> {
    let mut pool: Vec<&Course> = candidates
        .iter()
        .filter(|c| !selection.contains(&c.id))
        .filter(|c| prefs.accepts(c))
        .filter(|c| !selection.courses().iter().any(|s| courses_conflict(c, s)))
        .collect();
    pool.shuffle(rng);

    let remaining = target_credits - selection.total_credits();
    let mut credits = 0.0;
    let mut picked = Vec::new();

    for course in pool {
        if picked.len() >= max_suggestions {
            break;
        }
        if credits + course.credits <= remaining {
            credits += course.credits;
            picked.push(course.clone());
        }
    }

    debug!(
        "Recommended {} course(s) for {:.1} of {:.1} remaining credits",
        picked.len(),
        credits,
        remaining
    );
    picked
}

/// A suggested course the store refused.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub course_id: String,
    pub code: String,
    pub reason: String,
    /// Ids of selected courses that blocked it
    pub conflicts_with: Vec<String>,
}

impl Rejection {
    fn from_error(course: &Course, err: &SelectionError) -> Self {
        Self {
            course_id: course.id.clone(),
            code: course.code.clone(),
            reason: err.to_string(),
            conflicts_with: err
                .conflicting_courses()
                .iter()
                .map(|c| c.id.clone())
                .collect(),
        }
    }
}

/// Outcome of applying a batch of suggestions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub added: Vec<String>,
    pub rejected: Vec<Rejection>,
    pub total_credits: f32,
}

/// Adds each course in order, recording which ones the store rejected.
pub fn apply_all<I>(store: &mut SelectionStore, courses: I) -> BatchReport
where
    I: IntoIterator<Item = Course>,
{
    let mut report = BatchReport::default();

    for course in courses {
        match store.add_course(course.clone()) {
            Ok(added) => report.added.push(added.course_id),
            Err(e) => {
                debug!("Suggestion {} rejected: {}", course.id, e);
                report.rejected.push(Rejection::from_error(&course, &e));
            }
        }
    }

    report.total_credits = store.total_credits();
    info!(
        "Applied suggestions: {} added, {} rejected",
        report.added.len(),
        report.rejected.len()
    );
    report
}
