use crate::analyzer::rank_offers;
use crate::config::AppConfig;
use crate::model::{CatalogItem, LoadError, RankedOffer};
use crate::parser::{CatalogSheetParser, OfferSheetParser, Parser};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// An immutable copy of a loaded table.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub rows: Arc<[T]>,
    pub loaded_at: DateTime<Utc>,
}

/// Lazily filled cache for one table. Loaded on first use, dropped only by
/// `invalidate`.
#[derive(Debug)]
pub struct TableCache<T> {
    path: PathBuf,
    snapshot: Option<Snapshot<T>>,
}

impl<T> TableCache<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: None,
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.loaded_at)
    }

    /// Returns the cached rows, running `load` on the backing file first if
    /// nothing is cached yet. A failed load leaves the cache empty.
    pub fn get_or_load<F>(&mut self, load: F) -> Result<Arc<[T]>, LoadError>
    where
        F: FnOnce(BufReader<File>) -> Result<Vec<T>, LoadError>,
    {
        if let Some(snapshot) = &self.snapshot {
            debug!("Cache hit for {}", self.path.display());
            return Ok(Arc::clone(&snapshot.rows));
        }

        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let rows: Arc<[T]> = load(BufReader::new(file))?.into();
        info!("Loaded {} rows from {}", rows.len(), self.path.display());

        self.snapshot = Some(Snapshot {
            rows: Arc::clone(&rows),
            loaded_at: Utc::now(),
        });
        Ok(rows)
    }

    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            debug!("Invalidated cache for {}", self.path.display());
        }
    }
}

/// Owns both data sources and their caches.
pub struct DataStore {
    offers: TableCache<RankedOffer>,
    catalog: TableCache<CatalogItem>,
    offer_parser: OfferSheetParser,
    catalog_parser: CatalogSheetParser,
}

impl DataStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            offers: TableCache::new(&config.offers_path),
            catalog: TableCache::new(&config.catalog_path),
            offer_parser: OfferSheetParser::from_config(config),
            catalog_parser: CatalogSheetParser::from_config(config),
        }
    }

    /// Ranked offers, best deal first.
    pub fn load_offers(&mut self) -> Result<Arc<[RankedOffer]>, LoadError> {
        let parser = &self.offer_parser;
        self.offers.get_or_load(|reader| {
            let rows = parser.parse(reader)?;
            Ok(rank_offers(&rows))
        })
    }

    pub fn load_catalog(&mut self) -> Result<Arc<[CatalogItem]>, LoadError> {
        let parser = &self.catalog_parser;
        self.catalog.get_or_load(|reader| parser.parse(reader))
    }

    pub fn offers_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.offers.loaded_at()
    }

    /// Drops both cached tables so the next load rereads the files.
    pub fn invalidate(&mut self) {
        self.offers.invalidate();
        self.catalog.invalidate();
        info!("Data caches cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            offers_path: dir.join("offers.csv"),
            catalog_path: dir.join("catalog.csv"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn offers_are_cached_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        fs::write(
            &cfg.offers_path,
            "Item,Our Price,Walmart Price,Safeway Price\nTea,$1,$2,\n",
        )
        .unwrap();

        let mut store = DataStore::new(&cfg);
        assert!(store.offers_loaded_at().is_none());
        let first = store.load_offers().unwrap();
        assert_eq!(first.len(), 1);
        assert!(store.offers_loaded_at().is_some());

        fs::write(
            &cfg.offers_path,
            "Item,Our Price,Walmart Price,Safeway Price\nTea,$1,$2,\nCoffee,$5,,$6\n",
        )
        .unwrap();
        assert_eq!(store.load_offers().unwrap().len(), 1);

        store.invalidate();
        assert_eq!(store.load_offers().unwrap().len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        let mut store = DataStore::new(&cfg);

        assert!(matches!(store.load_catalog(), Err(LoadError::Io { .. })));

        fs::write(&cfg.catalog_path, "Name,Walmart,Safeway\nRice,$1,$2\n").unwrap();
        assert_eq!(store.load_catalog().unwrap().len(), 1);
    }

    #[test]
    fn table_cache_runs_loader_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "x").unwrap();

        let mut cache: TableCache<u8> = TableCache::new(&path);
        let mut calls = 0;
        cache
            .get_or_load(|_| {
                calls += 1;
                Ok(vec![1, 2])
            })
            .unwrap();
        let rows = cache
            .get_or_load(|_| {
                calls += 1;
                Ok(vec![])
            })
            .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(&*rows, &[1, 2]);
        assert!(cache.loaded_at().is_some());
    }
}
