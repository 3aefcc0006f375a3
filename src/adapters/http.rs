use crate::domain::model::Course;
use crate::domain::ports::{ConfigProvider, CourseSource};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Body of the completed-courses endpoint.
#[derive(Debug, Deserialize)]
struct CompletedResponse {
    data: Vec<String>,
}

pub struct HttpCourseSource {
    client: Client,
    courses_endpoint: String,
    completed_endpoint: String,
}

impl HttpCourseSource {
    pub fn new(config: &impl ConfigProvider) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            courses_endpoint: config.courses_endpoint().to_string(),
            completed_endpoint: config.completed_endpoint().to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        tracing::debug!("Making API request to: {}", endpoint);
        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        self.get_json(&self.courses_endpoint).await
    }

    async fn fetch_completed_numbers(&self) -> Result<Vec<String>> {
        let response: CompletedResponse = self.get_json(&self.completed_endpoint).await?;
        Ok(response.data)
    }
}
