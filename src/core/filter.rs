use crate::domain::model::{Course, ALL_SUBJECTS};

/// Subject and free-text criteria for the search view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFilter {
    pub subject: String,
    pub query: String,
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self {
            subject: ALL_SUBJECTS.to_string(),
            query: String::new(),
        }
    }
}

impl CourseFilter {
    pub fn new(subject: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            query: query.into(),
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        matches_subject(course, &self.subject) && matches_query(course, &normalize_query(&self.query))
    }

    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        filter(courses, &self.subject, &self.query)
    }
}

/// Courses of `subject` (or every subject for `"All"`) whose number, name,
/// subject, description or keywords contain `query`, ignoring case. Input
/// order is kept.
pub fn filter(courses: &[Course], subject: &str, query: &str) -> Vec<Course> {
    let query = normalize_query(query);
    let filtered: Vec<Course> = courses
        .iter()
        .filter(|course| matches_subject(course, subject) && matches_query(course, &query))
        .cloned()
        .collect();

    tracing::debug!(
        subject,
        query = %query,
        matched = filtered.len(),
        total = courses.len(),
        "Filtered catalog"
    );
    filtered
}

/// `"All"` followed by each distinct subject in first-seen order.
pub fn extract_subjects(courses: &[Course]) -> Vec<String> {
    let mut subjects = vec![ALL_SUBJECTS.to_string()];
    for course in courses {
        if !subjects.iter().any(|s| s == &course.subject) {
            subjects.push(course.subject.clone());
        }
    }
    subjects
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn matches_subject(course: &Course, subject: &str) -> bool {
    subject == ALL_SUBJECTS || course.subject == subject
}

fn matches_query(course: &Course, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let contains = |field: &str| field.to_lowercase().contains(query);
    contains(&course.number)
        || contains(&course.name)
        || contains(&course.subject)
        || contains(&course.description)
        || course.keywords.iter().any(|k| contains(k))
}
