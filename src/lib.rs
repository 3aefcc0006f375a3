pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HttpCourseSource;
pub use app::{Action, Session};
pub use config::{Settings, SourceSettings};
pub use crate::core::{catalog::CatalogStore, loader::CatalogLoader};
pub use domain::model::{Course, Rating};
pub use utils::error::{CatalogError, Result};
