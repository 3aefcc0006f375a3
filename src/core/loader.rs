use crate::core::catalog::{resolve_completed, CatalogStore};
use crate::domain::model::Course;
use crate::domain::ports::CourseSource;
use crate::utils::error::Result;

/// Output of the first stage: the course list, before completed courses are
/// known.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedCatalog {
    pub courses: Vec<Course>,
}

/// Runs the startup fetches in order: courses first, then the completed
/// course numbers resolved against them.
pub struct CatalogLoader<S: CourseSource> {
    source: S,
}

impl<S: CourseSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn fetch_catalog(&self) -> Result<FetchedCatalog> {
        let courses = self.source.fetch_courses().await?;
        tracing::info!("Fetched {} courses", courses.len());
        Ok(FetchedCatalog { courses })
    }

    pub async fn resolve_completed(&self, fetched: &FetchedCatalog) -> Result<CatalogStore> {
        let numbers = self.source.fetch_completed_numbers().await?;
        tracing::info!("Fetched {} completed course numbers", numbers.len());

        let store = CatalogStore::new(fetched.courses.clone());
        let resolution = resolve_completed(store.courses(), &numbers);
        Ok(store.with_completed(resolution))
    }

    /// Never fails. A failed course fetch yields an empty store and skips
    /// the second fetch; a failed completed fetch keeps the courses.
    pub async fn load(&self) -> CatalogStore {
        let fetched = match self.fetch_catalog().await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::error!("❌ Failed to fetch courses: {}", e);
                return CatalogStore::default();
            }
        };

        match self.resolve_completed(&fetched).await {
            Ok(store) => {
                tracing::info!(
                    courses = store.courses().len(),
                    completed = store.completed().len(),
                    unresolved = store.unresolved().len(),
                    "✅ Catalog loaded"
                );
                store
            }
            Err(e) => {
                tracing::error!("❌ Failed to fetch completed courses: {}", e);
                CatalogStore::new(fetched.courses)
            }
        }
    }
}
