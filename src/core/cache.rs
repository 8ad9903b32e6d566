use crate::core::fetch::FetchOrchestrator;
use crate::core::parser::{normalize_name, MenuParser};
use crate::domain::model::DateMenu;
use crate::domain::ports::{Extractor, MenuConfigProvider, Transport};
use crate::utils::error::{MenuError, Result};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

/// Date-indexed menu store that fills itself from the configured sources.
///
/// Entries are only added by a fully successful fetch-and-parse batch and are
/// kept for the life of the process. Returned menus are snapshots.
pub struct MenuCache<T: Transport, E: Extractor> {
    orchestrator: FetchOrchestrator<T>,
    parser: MenuParser<E>,
    sources: Vec<String>,
    favorites: Vec<String>,
    excluded: Vec<String>,
    menus: RwLock<HashMap<NaiveDate, DateMenu>>,
}

impl<T: Transport, E: Extractor> MenuCache<T, E> {
    pub fn new<C: MenuConfigProvider>(transport: T, extractor: E, config: &C) -> Self {
        Self::with_lists(
            transport,
            extractor,
            config.sources().to_vec(),
            config.favorites().to_vec(),
            config.excluded().to_vec(),
        )
    }

    pub fn with_lists(
        transport: T,
        extractor: E,
        sources: Vec<String>,
        favorites: Vec<String>,
        excluded: Vec<String>,
    ) -> Self {
        Self {
            orchestrator: FetchOrchestrator::new(transport),
            parser: MenuParser::new(extractor),
            sources,
            favorites: favorites.iter().map(|name| normalize_name(name)).collect(),
            excluded: excluded.iter().map(|name| normalize_name(name)).collect(),
            menus: RwLock::new(HashMap::new()),
        }
    }

    /// Menu for `date`. A miss fetches `date..=date + prefetch_days` from
    /// every source in one batch and stores each date of the window. Only an
    /// exact hit on `date` skips the network.
    pub async fn get_menu(&self, date: NaiveDate, prefetch_days: u32) -> Result<DateMenu> {
        if let Some(menu) = self.cached(date) {
            tracing::debug!("cache hit for {}", date);
            return Ok(menu);
        }

        tracing::debug!("cache miss for {}", date);
        if self.sources.is_empty() {
            return Err(MenuError::InvalidConfigValue {
                field: "sources".to_string(),
                value: "[]".to_string(),
                reason: "at least one menu source is required".to_string(),
            });
        }

        let pages = self
            .orchestrator
            .fetch_window(date, prefetch_days, &self.sources)
            .await?;

        // Parse everything before touching the cache so a bad page leaves it
        // unchanged.
        let mut window: BTreeMap<NaiveDate, DateMenu> = BTreeMap::new();
        for page in &pages {
            let parsed = self
                .parser
                .parse(&page.body, &self.favorites, &self.excluded)
                .inspect_err(|e| tracing::warn!("failed to parse {}: {}", page.target.url, e))?;
            window.entry(page.target.date).or_default().merge(parsed);
        }

        let mut menus = self.menus.write().unwrap_or_else(PoisonError::into_inner);
        for (day, merged) in window {
            tracing::info!("caching {} restaurants for {}", merged.len(), day);
            menus.entry(day).or_default().merge(merged);
        }

        Ok(menus.entry(date).or_default().clone())
    }

    /// Runs `get_menu` on a current-thread runtime that lives only for this
    /// call. Must not be called from inside another tokio runtime.
    pub fn get_menu_blocking(&self, date: NaiveDate, prefetch_days: u32) -> Result<DateMenu> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| MenuError::Runtime {
                message: e.to_string(),
            })?;
        runtime.block_on(self.get_menu(date, prefetch_days))
    }

    pub fn cached(&self, date: NaiveDate) -> Option<DateMenu> {
        self.menus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&date)
            .cloned()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.menus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&date)
    }

    pub fn cached_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .menus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        dates.sort();
        dates
    }

    pub fn len(&self) -> usize {
        self.menus.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
