use crate::domain::model::Course;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote source of catalog data.
#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>>;

    /// Numbers of the courses the student has completed.
    async fn fetch_completed_numbers(&self) -> Result<Vec<String>>;
}

pub trait ConfigProvider: Send + Sync {
    fn courses_endpoint(&self) -> &str;
    fn completed_endpoint(&self) -> &str;
    fn timeout_secs(&self) -> u64;
}
