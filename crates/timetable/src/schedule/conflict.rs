//! Course-level conflict detection.

use super::course::Course;

/// Returns true if any meeting of `x` overlaps any meeting of `y`.
pub fn courses_conflict(x: &Course, y: &Course) -> bool {
    x.intervals
        .iter()
        .any(|ix| y.intervals.iter().any(|iy| ix.overlaps(iy)))
}

/// Collects every course in `selected` that conflicts with `candidate`,
/// keeping the order of `selected`.
pub fn find_conflicts<'a, I>(candidate: &Course, selected: I) -> Vec<&'a Course>
where
    I: IntoIterator<Item = &'a Course>,
{
    selected
        .into_iter()
        .filter(|existing| courses_conflict(candidate, existing))
        .collect()
}
