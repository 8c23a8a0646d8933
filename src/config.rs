use crate::model::{CompareStore, ConfigError};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub offers_path: PathBuf,
    pub catalog_path: PathBuf,
    pub own_store: String,
    pub competitor_a: String,
    pub competitor_b: String,
    pub title: String,
    pub updated_on: Option<NaiveDate>,
    pub top_offers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            offers_path: PathBuf::from("offers.csv"),
            catalog_path: PathBuf::from("catalog.csv"),
            own_store: "Your Store".into(),
            competitor_a: "Walmart".into(),
            competitor_b: "Safeway".into(),
            title: "Basket Price Comparator".into(),
            updated_on: None,
            top_offers: 10,
        }
    }
}

impl AppConfig {
    /// Display name of a compare store.
    pub fn store_name(&self, store: CompareStore) -> &str {
        match store {
            CompareStore::CompetitorA => &self.competitor_a,
            CompareStore::CompetitorB => &self.competitor_b,
        }
    }
}

/// Reads the JSON config. A missing file falls back to defaults; an unreadable
/// or malformed one is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
