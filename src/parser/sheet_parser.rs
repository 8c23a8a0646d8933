// CSV sheet parsing for the offers and catalog tables
use crate::config::AppConfig;
use crate::model::{CatalogItem, LoadError, OfferRow, StoreListing};
use crate::normalizer::{clean_text, normalize_header, price_to_float, safe_url};
use csv::{ReaderBuilder, StringRecord};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use tracing::{debug, warn};

pub trait Parser {
    type Row;

    fn parse<R: Read>(&self, reader: R) -> Result<Vec<Self::Row>, LoadError>;
}

/// Column positions keyed by normalized header.
struct HeaderIndex {
    by_name: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(headers: &StringRecord) -> Self {
        let mut by_name = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            // first occurrence wins on duplicate headers
            by_name.entry(normalize_header(header)).or_insert(i);
        }
        Self { by_name }
    }

    fn find(&self, aliases: &[String]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.by_name.get(&normalize_header(alias)).copied())
    }

    fn require(&self, aliases: &[String]) -> Result<usize, LoadError> {
        self.find(aliases)
            .ok_or_else(|| LoadError::MissingColumn(aliases[0].clone()))
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index.and_then(|i| record.get(i))
}

fn owned_cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    cell(record, index).map(str::to_string)
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Reads the weekly offers sheet. Prices stay raw here; ranking normalizes them.
pub struct OfferSheetParser {
    competitor_a: String,
    competitor_b: String,
}

impl OfferSheetParser {
    pub fn new(competitor_a: impl Into<String>, competitor_b: impl Into<String>) -> Self {
        Self {
            competitor_a: competitor_a.into(),
            competitor_b: competitor_b.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.competitor_a, &config.competitor_b)
    }
}

struct StoreColumns {
    price: usize,
    link: Option<usize>,
    image: Option<usize>,
}

impl StoreColumns {
    fn resolve(index: &HeaderIndex, store: &str) -> Result<Self, LoadError> {
        Ok(Self {
            price: index.require(&[format!("{store} price")])?,
            link: index.find(&[format!("{store} link")]),
            image: index.find(&[format!("{store} image")]),
        })
    }

    fn listing(&self, record: &StringRecord) -> StoreListing {
        StoreListing {
            price: owned_cell(record, Some(self.price)),
            link: owned_cell(record, self.link),
            image: owned_cell(record, self.image),
        }
    }
}

impl Parser for OfferSheetParser {
    type Row = OfferRow;

    fn parse<R: Read>(&self, reader: R) -> Result<Vec<OfferRow>, LoadError> {
        let mut rdr = reader_for(reader);
        let index = HeaderIndex::new(rdr.headers()?);

        let item = index.require(&aliases(&["Item", "Name"]))?;
        let own_price = index.require(&aliases(&["Our Price", "Own Price"]))?;
        let store_a = StoreColumns::resolve(&index, &self.competitor_a)?;
        let store_b = StoreColumns::resolve(&index, &self.competitor_b)?;
        let note = index.find(&aliases(&["Inexact Match"]));

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(OfferRow {
                item: cell(&record, Some(item)).unwrap_or("").trim().to_string(),
                own_price: owned_cell(&record, Some(own_price)),
                competitor_a: store_a.listing(&record),
                competitor_b: store_b.listing(&record),
                inexact_match: owned_cell(&record, note),
            });
        }

        debug!("Parsed {} offer rows", rows.len());
        Ok(rows)
    }
}

/// Reads the basket catalog. Items are keyed by name; later duplicates are
/// skipped.
pub struct CatalogSheetParser {
    competitor_a: String,
    competitor_b: String,
}

impl CatalogSheetParser {
    pub fn new(competitor_a: impl Into<String>, competitor_b: impl Into<String>) -> Self {
        Self {
            competitor_a: competitor_a.into(),
            competitor_b: competitor_b.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.competitor_a, &config.competitor_b)
    }
}

impl Parser for CatalogSheetParser {
    type Row = CatalogItem;

    fn parse<R: Read>(&self, reader: R) -> Result<Vec<CatalogItem>, LoadError> {
        let (a, b) = (&self.competitor_a, &self.competitor_b);
        let mut rdr = reader_for(reader);
        let index = HeaderIndex::new(rdr.headers()?);

        let name = index.require(&aliases(&["Name", "Item"]))?;
        let a_price = index.require(&[a.clone(), format!("{a} price")])?;
        let a_link = index.find(&[format!("{a} link")]);
        let a_image = index.find(&[format!("{a} image")]);
        let b_price = index.require(&[b.clone(), format!("{b} price")])?;
        let b_link = index.find(&[format!("{b} link")]);

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let Some(item_name) = clean_text(cell(&record, Some(name))) else {
                debug!("Skipping catalog row without a name: {:?}", record);
                continue;
            };
            if !seen.insert(item_name.clone()) {
                warn!("Duplicate catalog item '{}', keeping the first", item_name);
                continue;
            }

            items.push(CatalogItem {
                name: item_name,
                competitor_a_price: price_to_float(cell(&record, Some(a_price))),
                competitor_a_link: safe_url(cell(&record, a_link)),
                competitor_a_image: clean_text(cell(&record, a_image)),
                competitor_b_price: price_to_float(cell(&record, Some(b_price))),
                competitor_b_link: safe_url(cell(&record, b_link)),
            });
        }

        debug!("Parsed {} catalog items", items.len());
        Ok(items)
    }
}
