use crate::model::{CompareStore, OfferRow, RankedOffer};
use crate::normalizer::{clean_text, price_to_float, safe_url};
use std::cmp::Ordering;
use tracing::debug;

/// Competitor A wins whenever it has a price, even if B is cheaper. B is only
/// the fallback.
pub fn resolve_compare_store(
    competitor_a_price: Option<f64>,
    competitor_b_price: Option<f64>,
) -> Option<(CompareStore, f64)> {
    match (competitor_a_price, competitor_b_price) {
        (Some(a), _) => Some((CompareStore::CompetitorA, a)),
        (None, Some(b)) => Some((CompareStore::CompetitorB, b)),
        (None, None) => None,
    }
}

/// Absolute and percentage savings against the compare price.
pub fn compute_savings(compare_price: Option<f64>, own_price: Option<f64>) -> (Option<f64>, Option<f64>) {
    let (Some(compare), Some(own)) = (compare_price, own_price) else {
        return (None, None);
    };
    let savings = compare - own;
    let pct = (compare != 0.0).then(|| savings / compare * 100.0);
    (Some(savings), pct)
}

/// Normalizes a single row. `None` means there is nothing to compare against.
pub fn rank_row(row: &OfferRow) -> Option<RankedOffer> {
    let own_price = price_to_float(row.own_price.as_deref());
    let competitor_a_price = price_to_float(row.competitor_a.price.as_deref());
    let competitor_b_price = price_to_float(row.competitor_b.price.as_deref());

    let (store, price) = resolve_compare_store(competitor_a_price, competitor_b_price)?;
    let listing = match store {
        CompareStore::CompetitorA => &row.competitor_a,
        CompareStore::CompetitorB => &row.competitor_b,
    };
    let (savings, savings_pct) = compute_savings(Some(price), own_price);

    Some(RankedOffer {
        item: row.item.clone(),
        own_price,
        competitor_a_price,
        competitor_b_price,
        compare_store: store,
        compare_price: price,
        compare_link: safe_url(listing.link.as_deref()),
        compare_image: clean_text(listing.image.as_deref()),
        savings,
        savings_pct,
        inexact_match: clean_text(row.inexact_match.as_deref()).unwrap_or_default(),
    })
}

/// Descending with absent values last.
fn desc_absent_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(f64::NEG_INFINITY);
    let b = b.unwrap_or(f64::NEG_INFINITY);
    b.total_cmp(&a)
}

/// Best deals first: by savings percentage, then by dollar savings.
pub fn compare_deals(a: &RankedOffer, b: &RankedOffer) -> Ordering {
    desc_absent_last(a.savings_pct, b.savings_pct)
        .then_with(|| desc_absent_last(a.savings, b.savings))
}

/// Turns raw offer rows into the ranked list. Rows without any competitor
/// price are dropped; the sort is stable so full ties keep file order.
pub fn rank_offers(rows: &[OfferRow]) -> Vec<RankedOffer> {
    let mut ranked: Vec<RankedOffer> = rows.iter().filter_map(rank_row).collect();
    let dropped = rows.len() - ranked.len();
    if dropped > 0 {
        debug!("Dropped {} offers with no comparison price", dropped);
    }

    ranked.sort_by(compare_deals);
    ranked
}
