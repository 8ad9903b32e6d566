use crate::domain::ports::Transport;
use crate::utils::error::{MenuError, Result};
use chrono::{Days, NaiveDate};
use futures::future::try_join_all;
use std::time::Instant;
use url::Url;

/// One (date, source) pair of a fetch window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub date: NaiveDate,
    pub source: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub target: FetchTarget,
    pub body: String,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Appends the `date=YYYY-MM-DD` query parameter to a source endpoint.
pub fn source_url(source: &str, date: NaiveDate) -> Result<String> {
    let mut url = Url::parse(source).map_err(|e| MenuError::InvalidConfigValue {
        field: "sources".to_string(),
        value: source.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    url.query_pairs_mut().append_pair("date", &format_date(date));
    Ok(url.into())
}

/// Dates `base..=base + prefetch_days`, each crossed with every source in
/// order.
pub fn window_targets(base: NaiveDate, prefetch_days: u32, sources: &[String]) -> Result<Vec<FetchTarget>> {
    let mut targets = Vec::with_capacity((prefetch_days as usize + 1) * sources.len());

    for offset in 0..=prefetch_days {
        let date = base
            .checked_add_days(Days::new(offset.into()))
            .ok_or_else(|| MenuError::InvalidDate {
                message: format!("{} + {} days is out of range", base, offset),
            })?;

        for source in sources {
            targets.push(FetchTarget {
                date,
                source: source.clone(),
                url: source_url(source, date)?,
            });
        }
    }

    Ok(targets)
}

pub struct FetchOrchestrator<T: Transport> {
    transport: T,
}

impl<T: Transport> FetchOrchestrator<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches every target of the window concurrently. The first failure
    /// fails the whole batch; on success the pages come back in target
    /// order.
    pub async fn fetch_window(
        &self,
        base: NaiveDate,
        prefetch_days: u32,
        sources: &[String],
    ) -> Result<Vec<FetchedPage>> {
        let targets = window_targets(base, prefetch_days, sources)?;
        let now = Instant::now();
        let count = targets.len();
        tracing::info!("fetching {} pages for {} (+{} days)", count, base, prefetch_days);

        let transport = &self.transport;
        let requests = targets.into_iter().map(move |target| async move {
            let body = transport.get(&target.url).await?;
            Ok::<_, MenuError>(FetchedPage { target, body })
        });

        let pages = try_join_all(requests).await.inspect_err(|e| {
            tracing::warn!("fetch batch for {} failed: {}", base, e);
        })?;

        tracing::info!("fetched {} pages in {:.2?}", count, now.elapsed());
        Ok(pages)
    }
}
