use crate::model::{Basket, BasketError, BasketLine, BasketTotals, CatalogItem};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
struct BasketEntry {
    quantity: u32,
    price_override: Option<f64>,
}

impl Default for BasketEntry {
    fn default() -> Self {
        Self {
            quantity: 1,
            price_override: None,
        }
    }
}

/// Per-session basket edits: quantities and the user's own prices, keyed by
/// catalog item name. Owned by the caller; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct BasketState {
    entries: HashMap<String, BasketEntry>,
}

impl BasketState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking every catalog item not seen before (quantity 1, no
    /// price override). Items already tracked keep their edits. Returns how
    /// many items were added.
    pub fn initialize(&mut self, catalog: &[CatalogItem]) -> usize {
        let mut added = 0;
        for item in catalog {
            if !self.entries.contains_key(&item.name) {
                self.entries.insert(item.name.clone(), BasketEntry::default());
                added += 1;
            }
        }
        if added > 0 {
            debug!("Basket now tracks {} items ({} new)", self.entries.len(), added);
        }
        added
    }

    /// Stops tracking names the catalog no longer lists, so edits on them
    /// fail as unknown. Returns how many entries were dropped.
    pub fn retain_catalog(&mut self, catalog: &[CatalogItem]) -> usize {
        let names: HashSet<&str> = catalog.iter().map(|i| i.name.as_str()).collect();
        let before = self.entries.len();
        self.entries.retain(|name, _| names.contains(name.as_str()));

        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!("Basket dropped {} items no longer in the catalog", dropped);
        }
        dropped
    }

    /// Quantity 0 takes the item out of the basket.
    pub fn set_quantity(&mut self, name: &str, quantity: u32) -> Result<(), BasketError> {
        let entry = self.entry_mut(name)?;
        entry.quantity = quantity;
        Ok(())
    }

    pub fn set_price(&mut self, name: &str, price: f64) -> Result<(), BasketError> {
        if !price.is_finite() || price < 0.0 {
            return Err(BasketError::InvalidPrice(price));
        }
        let entry = self.entry_mut(name)?;
        entry.price_override = Some(price);
        Ok(())
    }

    pub fn quantity(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|e| e.quantity)
    }

    pub fn price_override(&self, name: &str) -> Option<f64> {
        self.entries.get(name).and_then(|e| e.price_override)
    }

    /// The price the user pays for an item at their own store: their edit if
    /// any, otherwise the competitor A price.
    pub fn user_price(&self, item: &CatalogItem) -> f64 {
        self.price_override(&item.name)
            .unwrap_or_else(|| item.default_user_price())
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut BasketEntry, BasketError> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| BasketError::UnknownItem(name.to_string()))
    }
}

/// Builds basket lines (catalog order) for every item with a positive
/// quantity and sums them per price source. Missing competitor prices count
/// as zero for that store only.
pub fn compute_basket(catalog: &[CatalogItem], state: &BasketState) -> Basket {
    let lines: Vec<BasketLine> = catalog
        .iter()
        .filter_map(|item| basket_line(item, state))
        .collect();
    let totals = BasketTotals::from_lines(&lines);

    Basket { lines, totals }
}

fn basket_line(item: &CatalogItem, state: &BasketState) -> Option<BasketLine> {
    let quantity = state.quantity(&item.name).filter(|&q| q > 0)?;
    let qty = f64::from(quantity);
    let user_price = state.user_price(item);

    Some(BasketLine {
        name: item.name.clone(),
        quantity,
        competitor_a_price: item.competitor_a_unit(),
        competitor_b_price: item.competitor_b_unit(),
        user_price,
        competitor_a_total: item.competitor_a_unit() * qty,
        competitor_b_total: item.competitor_b_unit() * qty,
        user_total: user_price * qty,
    })
}

impl BasketTotals {
    /// Column sums over basket lines.
    pub fn from_lines(lines: &[BasketLine]) -> Self {
        lines.iter().fold(Self::default(), |mut acc, line| {
            acc.competitor_a += line.competitor_a_total;
            acc.competitor_b += line.competitor_b_total;
            acc.user += line.user_total;
            acc
        })
    }
}
