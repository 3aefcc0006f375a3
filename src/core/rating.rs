use crate::domain::model::{Course, Rating};

/// Copy of `completed` with `rating` applied to the course numbered
/// `course_number`. Unknown numbers yield an unchanged copy.
pub fn set_rating(completed: &[Course], course_number: &str, rating: Rating) -> Vec<Course> {
    let mut found = false;
    let updated: Vec<Course> = completed
        .iter()
        .map(|course| {
            if course.number == course_number {
                found = true;
                Course {
                    rating: Some(rating),
                    ..course.clone()
                }
            } else {
                course.clone()
            }
        })
        .collect();

    if found {
        tracing::debug!(course = course_number, %rating, "Rated completed course");
    } else {
        tracing::debug!(course = course_number, "No completed course to rate");
    }
    updated
}

/// Completed courses that have not been rated yet.
pub fn needs_rating_count(completed: &[Course]) -> usize {
    let rated = completed.iter().filter(|c| c.rating.is_some()).count();
    completed.len() - rated
}
