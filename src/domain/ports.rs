use crate::domain::model::ExtractedPage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Fetches a page body for a URL. One attempt, no retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

/// Pulls the aligned title/meal columns out of a raw page.
pub trait Extractor: Send + Sync {
    fn extract(&self, raw_page: &str) -> Result<ExtractedPage>;
}

pub trait MenuConfigProvider: Send + Sync {
    fn favorites(&self) -> &[String];
    fn excluded(&self) -> &[String];
    fn sources(&self) -> &[String];
    fn prefetch_days(&self) -> u32;
}
