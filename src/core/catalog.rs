use crate::core::filter::extract_subjects;
use crate::domain::model::Course;
use std::collections::HashSet;

/// Snapshot of the catalog fetched at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStore {
    courses: Vec<Course>,
    subjects: Vec<String>,
    completed: Vec<Course>,
    unresolved: Vec<String>,
}

/// Completed course numbers matched against the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub completed: Vec<Course>,
    /// Numbers with no catalog entry, in request order.
    pub unresolved: Vec<String>,
}

impl CatalogStore {
    /// Builds a store from fetched courses. Later duplicates of a course
    /// number are dropped.
    pub fn new(courses: Vec<Course>) -> Self {
        let courses = dedupe_by_number(courses);
        let subjects = extract_subjects(&courses);
        Self {
            courses,
            subjects,
            completed: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_completed(self, resolution: Resolution) -> Self {
        Self {
            completed: resolution.completed,
            unresolved: resolution.unresolved,
            ..self
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn completed(&self) -> &[Course] {
        &self.completed
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn find(&self, number: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.number == number)
    }

    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn resolve_completed(&self, numbers: &[String]) -> Resolution {
        resolve_completed(&self.courses, numbers)
    }
}

/// Looks up each completed number in `catalog`. Misses are dropped from
/// `completed` and reported in `unresolved`.
pub fn resolve_completed(catalog: &[Course], numbers: &[String]) -> Resolution {
    let mut resolution = Resolution::default();

    for number in numbers {
        match catalog.iter().find(|c| &c.number == number) {
            Some(course) => resolution.completed.push(course.clone()),
            None => {
                tracing::warn!("Completed course {} is not in the catalog", number);
                resolution.unresolved.push(number.clone());
            }
        }
    }

    resolution
}

fn dedupe_by_number(courses: Vec<Course>) -> Vec<Course> {
    let mut seen = HashSet::new();
    courses
        .into_iter()
        .filter(|course| {
            let first = seen.insert(course.number.clone());
            if !first {
                tracing::warn!("Duplicate course number {} in catalog, keeping the first", course.number);
            }
            first
        })
        .collect()
}
