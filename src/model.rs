// Core structs: offers, catalog items, basket lines and the error types
use std::path::PathBuf;

/// Which competitor a ranked offer is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareStore {
    CompetitorA,
    CompetitorB,
}

/// One store's raw cells from an offers row.
#[derive(Debug, Clone, Default)]
pub struct StoreListing {
    pub price: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

/// An offers row as read from the sheet, before any normalization.
#[derive(Debug, Clone, Default)]
pub struct OfferRow {
    pub item: String,
    pub own_price: Option<String>,
    pub competitor_a: StoreListing,
    pub competitor_b: StoreListing,
    pub inexact_match: Option<String>,
}

/// A display-ready offer. Only rows with a compare price make it this far.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOffer {
    pub item: String,
    pub own_price: Option<f64>,
    pub competitor_a_price: Option<f64>,
    pub competitor_b_price: Option<f64>,
    pub compare_store: CompareStore,
    pub compare_price: f64,
    pub compare_link: Option<String>,
    pub compare_image: Option<String>,
    pub savings: Option<f64>,
    pub savings_pct: Option<f64>,
    pub inexact_match: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub competitor_a_price: Option<f64>,
    pub competitor_a_link: Option<String>,
    pub competitor_a_image: Option<String>,
    pub competitor_b_price: Option<f64>,
    pub competitor_b_link: Option<String>,
}

impl CatalogItem {
    /// Competitor A price as used in line totals (absent counts as zero).
    pub fn competitor_a_unit(&self) -> f64 {
        self.competitor_a_price.unwrap_or(0.0)
    }

    pub fn competitor_b_unit(&self) -> f64 {
        self.competitor_b_price.unwrap_or(0.0)
    }

    /// Starting value for the user's own price before they edit it.
    pub fn default_user_price(&self) -> f64 {
        match self.competitor_a_price {
            Some(p) if p > 0.0 => p,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasketLine {
    pub name: String,
    pub quantity: u32,
    pub competitor_a_price: f64,
    pub competitor_b_price: f64,
    pub user_price: f64,
    pub competitor_a_total: f64,
    pub competitor_b_total: f64,
    pub user_total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BasketTotals {
    pub competitor_a: f64,
    pub competitor_b: f64,
    pub user: f64,
}

impl BasketTotals {
    /// Competitor B total relative to competitor A.
    pub fn competitor_b_delta(&self) -> f64 {
        self.competitor_b - self.competitor_a
    }

    /// User total relative to competitor A.
    pub fn user_delta(&self) -> f64 {
        self.user - self.competitor_a
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    pub lines: Vec<BasketLine>,
    pub totals: BasketTotals,
}

impl Basket {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot read table: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BasketError {
    #[error("unknown item '{0}'")]
    UnknownItem(String),
    #[error("invalid price {0}: must be a non-negative number")]
    InvalidPrice(f64),
}
