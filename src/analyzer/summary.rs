use crate::model::RankedOffer;

/// Headline numbers for the offers page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferSummary {
    /// Median percentage saved against competitor A.
    pub median_savings_pct: Option<f64>,
    /// Median dollar amount saved against competitor A.
    pub median_savings: Option<f64>,
    /// Number of offers with both our price and a competitor A price.
    pub comparable: usize,
    /// Every ranked offer, comparable or not.
    pub offer_count: usize,
}

/// Median of the values; even-sized input averages the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Summarizes ranked offers. Only offers that have both our price and a
/// competitor A price feed the medians. `None` when no offer qualifies.
pub fn summarize(offers: &[RankedOffer]) -> Option<OfferSummary> {
    let comparable: Vec<&RankedOffer> = offers
        .iter()
        .filter(|o| o.own_price.is_some() && o.competitor_a_price.is_some())
        .collect();
    if comparable.is_empty() {
        return None;
    }

    let pcts: Vec<f64> = comparable.iter().filter_map(|o| o.savings_pct).collect();
    let dollars: Vec<f64> = comparable.iter().filter_map(|o| o.savings).collect();

    Some(OfferSummary {
        median_savings_pct: median(&pcts),
        median_savings: median(&dollars),
        comparable: comparable.len(),
        offer_count: offers.len(),
    })
}

/// Short headline for an offer card.
pub fn deal_badge(offer: &RankedOffer) -> String {
    match (offer.savings_pct, offer.savings) {
        (Some(pct), _) if pct > 0.0 => format!("SAVE {pct:.0}%"),
        (_, Some(dollars)) if dollars > 0.0 => format!("SAVE ${dollars:.2}"),
        _ => "LOW PRICE".to_string(),
    }
}
