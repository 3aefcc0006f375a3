pub mod cart;
pub mod catalog;
pub mod filter;
pub mod loader;
pub mod rating;

pub use crate::domain::model::{Course, Rating, Section, Subsection};
pub use crate::domain::ports::{ConfigProvider, CourseSource};
pub use crate::utils::error::Result;
