// Console front end: renders the views and applies basket edits from stdin

pub mod command_handler;
pub mod listener;
pub mod render;

use crate::analyzer::BasketState;
use crate::config::AppConfig;
use crate::model::{CatalogItem, LoadError, RankedOffer};
use crate::storage::DataStore;
use std::sync::Arc;
use std::time::Instant;

/// One interactive session: the shared data store plus this session's basket.
pub struct Console {
    pub config: AppConfig,
    pub store: DataStore,
    pub basket: BasketState,
    pub start_time: Instant,
}

impl Console {
    pub fn new(config: AppConfig) -> Self {
        let store = DataStore::new(&config);
        Self {
            config,
            store,
            basket: BasketState::new(),
            start_time: Instant::now(),
        }
    }

    pub fn offers(&mut self) -> Result<Arc<[RankedOffer]>, LoadError> {
        self.store.load_offers()
    }

    /// Loads the catalog and keeps the basket in step with it: new items are
    /// tracked, items the catalog dropped are forgotten.
    pub fn catalog(&mut self) -> Result<Arc<[CatalogItem]>, LoadError> {
        let catalog = self.store.load_catalog()?;
        self.basket.retain_catalog(&catalog);
        self.basket.initialize(&catalog);
        Ok(catalog)
    }

    /// Catalog spelling of an item name. Exact matches win, then a unique
    /// case-insensitive one; otherwise the name comes back unchanged.
    pub fn resolve_item(&mut self, name: &str) -> Result<String, LoadError> {
        let catalog = self.catalog()?;
        if catalog.iter().any(|i| i.name == name) {
            return Ok(name.to_string());
        }
        let mut matches = catalog.iter().filter(|i| i.name.eq_ignore_ascii_case(name));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item.name.clone()),
            _ => Ok(name.to_string()),
        }
    }

    pub fn refresh(&mut self) {
        self.store.invalidate();
    }
}
