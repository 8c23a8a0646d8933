// console/render.rs

use crate::analyzer::{deal_badge, BasketState, OfferSummary};
use crate::config::AppConfig;
use crate::model::{Basket, CatalogItem, RankedOffer};
use crate::utils::{delta_label, updated_banner, usd, usd_grouped, usd_or_dash};
use std::fmt::Write;

pub fn render_header(config: &AppConfig) -> String {
    let mut out = format!("🧺 {}\n", config.title);
    if let Some(date) = config.updated_on {
        let _ = writeln!(out, "_{}_", updated_banner(date));
    }
    out
}

pub fn render_summary(config: &AppConfig, summary: Option<&OfferSummary>, offer_count: usize) -> String {
    let a = &config.competitor_a;
    let Some(summary) = summary else {
        return format!("🔥 Offers this week: {offer_count}\n");
    };

    let pct = summary
        .median_savings_pct
        .map(|p| format!("{p:.0}%"))
        .unwrap_or_else(|| "—".to_string());
    let dollars = usd_or_dash(summary.median_savings);
    format!(
        "📊 Median % off {a}: {pct}\n💵 Median $ savings: {dollars}\n\
         🔥 Offers this week: {} ({} priced at {a})\n",
        summary.offer_count, summary.comparable
    )
}

pub fn render_offer_card(config: &AppConfig, offer: &RankedOffer) -> String {
    let store = config.store_name(offer.compare_store);
    let mut card = format!("[{} vs {}] {}\n", deal_badge(offer), store, offer.item);
    let _ = writeln!(card, "  {} Our Price", usd_or_dash(offer.own_price));
    let _ = writeln!(
        card,
        "  {}: {} • You save {}",
        store,
        usd(offer.compare_price),
        usd_or_dash(offer.savings)
    );
    if !offer.inexact_match.is_empty() {
        let _ = writeln!(card, "  * {}", offer.inexact_match);
    }
    match &offer.compare_link {
        Some(link) => {
            let _ = writeln!(card, "  View at {store}: {link}");
        }
        None => card.push_str("  No link available\n"),
    }
    if let Some(image) = &offer.compare_image {
        let _ = writeln!(card, "  Image: {image}");
    }
    card
}

pub fn render_offers(config: &AppConfig, offers: &[RankedOffer], limit: usize) -> String {
    if offers.is_empty() {
        return "📭 No offers to compare.\n".to_string();
    }
    let mut out = String::new();
    for (i, offer) in offers.iter().take(limit).enumerate() {
        let _ = write!(out, "{}. {}", i + 1, render_offer_card(config, offer));
    }
    if offers.len() > limit {
        let _ = writeln!(out, "… {} more (use /offers {})", offers.len() - limit, offers.len());
    }
    out
}

pub fn render_catalog(config: &AppConfig, catalog: &[CatalogItem], basket: &BasketState) -> String {
    if catalog.is_empty() {
        return "📭 The catalog is empty.\n".to_string();
    }
    let mut out = String::from("Catalog – Adjust Your Basket\n");
    for item in catalog {
        let _ = writeln!(
            out,
            "• {} | {} {} | {} {} | {} {} | qty {}",
            item.name,
            config.competitor_a,
            usd(item.competitor_a_unit()),
            config.competitor_b,
            usd(item.competitor_b_unit()),
            config.own_store,
            usd(basket.user_price(item)),
            basket.quantity(&item.name).unwrap_or(0),
        );
        if let Some(link) = &item.competitor_a_link {
            let _ = writeln!(out, "    {}: {}", config.competitor_a, link);
        }
        if let Some(link) = &item.competitor_b_link {
            let _ = writeln!(out, "    {}: {}", config.competitor_b, link);
        }
        if let Some(image) = &item.competitor_a_image {
            let _ = writeln!(out, "    Image: {image}");
        }
    }
    out
}

pub fn render_basket(config: &AppConfig, basket: &Basket) -> String {
    let a = &config.competitor_a;
    let totals = &basket.totals;

    let mut out = String::from("Basket Summary\n");
    let _ = writeln!(out, "  {} basket: {}", a, usd_grouped(totals.competitor_a));
    let _ = writeln!(
        out,
        "  {} basket: {} ({})",
        config.competitor_b,
        usd_grouped(totals.competitor_b),
        delta_label(totals.competitor_b_delta(), a)
    );
    let _ = writeln!(
        out,
        "  {} basket: {} ({})",
        config.own_store,
        usd_grouped(totals.user),
        delta_label(totals.user_delta(), a)
    );

    if basket.is_empty() {
        out.push_str("Your basket is empty.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "\nItem | Qty | {} Price | {} Price | {} Price",
        a, config.competitor_b, config.own_store
    );
    for line in &basket.lines {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {}",
            line.name,
            line.quantity,
            usd(line.competitor_a_price),
            usd(line.competitor_b_price),
            usd(line.user_price)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compute_basket;
    use crate::model::CompareStore;

    fn offer() -> RankedOffer {
        RankedOffer {
            item: "Milk 1gal".into(),
            own_price: Some(3.0),
            competitor_a_price: Some(4.0),
            competitor_b_price: None,
            compare_store: CompareStore::CompetitorA,
            compare_price: 4.0,
            compare_link: Some("https://walmart.example/milk".into()),
            compare_image: None,
            savings: Some(1.0),
            savings_pct: Some(25.0),
            inexact_match: "half gallon at Walmart".into(),
        }
    }

    #[test]
    fn offer_card_shows_badge_prices_and_link() {
        let card = render_offer_card(&AppConfig::default(), &offer());
        assert!(card.starts_with("[SAVE 25% vs Walmart] Milk 1gal"));
        assert!(card.contains("$3.00 Our Price"));
        assert!(card.contains("Walmart: $4.00 • You save $1.00"));
        assert!(card.contains("* half gallon at Walmart"));
        assert!(card.contains("View at Walmart: https://walmart.example/milk"));
    }

    #[test]
    fn offer_card_placeholders() {
        let mut o = offer();
        o.own_price = None;
        o.savings = None;
        o.savings_pct = None;
        o.compare_link = None;
        o.inexact_match.clear();
        let card = render_offer_card(&AppConfig::default(), &o);
        assert!(card.contains("[LOW PRICE vs Walmart]"));
        assert!(card.contains("$— Our Price"));
        assert!(card.contains("You save $—"));
        assert!(card.contains("No link available"));
        assert!(!card.contains("* "));
        assert!(!card.contains("Image:"));
    }

    #[test]
    fn offer_card_shows_compare_image() {
        let mut o = offer();
        o.compare_image = Some("https://img.example/milk.jpg".into());
        let card = render_offer_card(&AppConfig::default(), &o);
        assert!(card.ends_with("  Image: https://img.example/milk.jpg\n"));
    }

    #[test]
    fn summary_counts_comparable_offers() {
        let summary = OfferSummary {
            median_savings_pct: Some(12.4),
            median_savings: Some(0.5),
            comparable: 3,
            offer_count: 5,
        };
        let out = render_summary(&AppConfig::default(), Some(&summary), 5);
        assert!(out.contains("📊 Median % off Walmart: 12%"));
        assert!(out.contains("💵 Median $ savings: $0.50"));
        assert!(out.contains("🔥 Offers this week: 5 (3 priced at Walmart)"));

        let out = render_summary(&AppConfig::default(), None, 2);
        assert_eq!(out, "🔥 Offers this week: 2\n");
    }

    #[test]
    fn catalog_lists_store_links_and_image() {
        let catalog = vec![
            CatalogItem {
                name: "Milk".into(),
                competitor_a_price: Some(3.78),
                competitor_a_link: Some("https://walmart.example/milk".into()),
                competitor_a_image: Some("https://img.example/milk.jpg".into()),
                competitor_b_price: Some(4.99),
                competitor_b_link: Some("https://safeway.example/milk".into()),
            },
            CatalogItem {
                name: "Rice".into(),
                competitor_a_price: None,
                competitor_a_link: None,
                competitor_a_image: None,
                competitor_b_price: Some(1.5),
                competitor_b_link: None,
            },
        ];
        let mut state = BasketState::new();
        state.initialize(&catalog);

        let out = render_catalog(&AppConfig::default(), &catalog, &state);
        assert!(out.contains("• Milk | Walmart $3.78 | Safeway $4.99 | Your Store $3.78 | qty 1\n"));
        assert!(out.contains("    Walmart: https://walmart.example/milk\n"));
        assert!(out.contains("    Safeway: https://safeway.example/milk\n"));
        assert!(out.contains("    Image: https://img.example/milk.jpg\n"));
        assert!(out.ends_with("• Rice | Walmart $0.00 | Safeway $1.50 | Your Store $0.00 | qty 1\n"));
    }

    #[test]
    fn offers_list_is_truncated() {
        let offers = vec![offer(), offer(), offer()];
        let out = render_offers(&AppConfig::default(), &offers, 2);
        assert!(out.contains("2. [SAVE"));
        assert!(!out.contains("3. [SAVE"));
        assert!(out.contains("1 more (use /offers 3)"));
    }

    #[test]
    fn empty_basket_message() {
        let out = render_basket(&AppConfig::default(), &Basket::default());
        assert!(out.contains("Walmart basket: $0.00"));
        assert!(out.contains("Safeway basket: $0.00 (+$0.00 vs Walmart)"));
        assert!(out.ends_with("Your basket is empty.\n"));
    }

    #[test]
    fn basket_table_and_deltas() {
        let catalog = vec![CatalogItem {
            name: "Bread".into(),
            competitor_a_price: Some(2.0),
            competitor_a_link: None,
            competitor_a_image: None,
            competitor_b_price: Some(2.5),
            competitor_b_link: None,
        }];
        let mut state = BasketState::new();
        state.initialize(&catalog);
        state.set_quantity("Bread", 2).unwrap();
        state.set_price("Bread", 1.5).unwrap();

        let out = render_basket(&AppConfig::default(), &compute_basket(&catalog, &state));
        assert!(out.contains("Walmart basket: $4.00"));
        assert!(out.contains("Safeway basket: $5.00 (+$1.00 vs Walmart)"));
        assert!(out.contains("Your Store basket: $3.00 (-$1.00 vs Walmart)"));
        assert!(out.contains("Bread | 2 | $2.00 | $2.50 | $1.50"));
    }
}
