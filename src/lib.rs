pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ReqwestTransport, ScraperExtractor};
pub use config::MenuConfig;
pub use core::{cache::MenuCache, parser::MenuParser};
pub use domain::model::{DateMenu, MealKind, MenuEntry};
pub use utils::error::{MenuError, Result};
