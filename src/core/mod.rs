pub mod cache;
pub mod fetch;
pub mod parser;
pub mod render;

pub use crate::domain::model::{DateMenu, ExtractedPage, MealKind, Meals, MenuEntry};
pub use crate::domain::ports::{Extractor, MenuConfigProvider, Transport};
pub use crate::utils::error::Result;
