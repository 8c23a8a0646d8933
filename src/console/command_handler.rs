// console/command_handler.rs

use crate::analyzer::{compute_basket, summarize};
use crate::console::render::{render_basket, render_catalog, render_offers, render_summary};
use crate::console::Console;
use crate::normalizer::price_to_float;
use crate::utils::usd;
use tracing::{info, warn};

pub const HELP: &str = "📋 Available commands:\n\
    /offers [n] — best deals first\n\
    /summary — median savings\n\
    /catalog — catalog with your quantities and prices\n\
    /basket — basket totals per store\n\
    /qty <n> <item> — set quantity (0 removes the item)\n\
    /price <amount> <item> — set your store's price\n\
    /refresh — reload the data files\n\
    /uptime — session uptime\n\
    /help — command list\n\
    /quit — leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

fn text(s: impl Into<String>) -> Reply {
    Reply::Text(s.into())
}

/// Handles one command line and returns what to show. Errors become messages;
/// they never end the session.
pub fn handle_command(command_text: &str, console: &mut Console) -> Reply {
    let command_text = command_text.trim();
    info!("Handling command: {}", command_text);

    let (command, args) = command_text
        .split_once(char::is_whitespace)
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((command_text, ""));

    match command {
        "/offers" => {
            let limit = if args.is_empty() {
                console.config.top_offers
            } else {
                match args.parse::<usize>() {
                    Ok(n) => n,
                    Err(_) => return text(format!("❌ Not a number: {args}")),
                }
            };
            match console.offers() {
                Ok(offers) => text(render_offers(&console.config, &offers, limit)),
                Err(e) => {
                    warn!("/offers load error: {}", e);
                    text(format!("❌ Offers unavailable: {e}"))
                }
            }
        }
        "/summary" => match console.offers() {
            Ok(offers) => text(render_summary(
                &console.config,
                summarize(&offers).as_ref(),
                offers.len(),
            )),
            Err(e) => {
                warn!("/summary load error: {}", e);
                text(format!("❌ Offers unavailable: {e}"))
            }
        },
        "/catalog" => match console.catalog() {
            Ok(catalog) => text(render_catalog(&console.config, &catalog, &console.basket)),
            Err(e) => {
                warn!("/catalog load error: {}", e);
                text(format!("❌ Catalog unavailable: {e}"))
            }
        },
        "/basket" => match console.catalog() {
            Ok(catalog) => {
                let basket = compute_basket(&catalog, &console.basket);
                text(render_basket(&console.config, &basket))
            }
            Err(e) => {
                warn!("/basket load error: {}", e);
                text(format!("❌ Catalog unavailable: {e}"))
            }
        },
        "/qty" => {
            let Some((amount, name)) = split_amount(args) else {
                return text("Usage: /qty <n> <item>");
            };
            let Ok(quantity) = amount.parse::<u32>() else {
                return text(format!("❌ Quantity must be a whole number ≥ 0, got '{amount}'"));
            };
            let name = match console.resolve_item(name) {
                Ok(name) => name,
                Err(e) => return text(format!("❌ Catalog unavailable: {e}")),
            };
            match console.basket.set_quantity(&name, quantity) {
                Ok(()) => text(format!("✅ {name}: qty {quantity}")),
                Err(e) => text(format!("❌ {e}")),
            }
        }
        "/price" => {
            let Some((amount, name)) = split_amount(args) else {
                return text("Usage: /price <amount> <item>");
            };
            let Some(price) = price_to_float(Some(amount)) else {
                return text(format!("❌ Not a price: '{amount}'"));
            };
            let name = match console.resolve_item(name) {
                Ok(name) => name,
                Err(e) => return text(format!("❌ Catalog unavailable: {e}")),
            };
            match console.basket.set_price(&name, price) {
                Ok(()) => text(format!("✅ {name}: {} at {}", usd(price), console.config.own_store)),
                Err(e) => text(format!("❌ {e}")),
            }
        }
        "/refresh" => {
            info!("/refresh command received, reloading data...");
            console.refresh();
            let offers = console.offers().map(|o| o.len());
            let catalog = console.catalog().map(|c| c.len());
            match (offers, catalog) {
                (Ok(o), Ok(c)) => {
                    let at = console
                        .store
                        .offers_loaded_at()
                        .map(|t| format!(" at {}", t.format("%H:%M:%S UTC")))
                        .unwrap_or_default();
                    text(format!("🔄 Reloaded {o} offers and {c} catalog items{at}."))
                }
                (Err(e), _) | (_, Err(e)) => text(format!("❌ Reload failed: {e}")),
            }
        }
        "/uptime" => {
            let uptime = console.start_time.elapsed();
            text(format!(
                "⏱ Uptime: {:02}:{:02}:{:02}",
                uptime.as_secs() / 3600,
                (uptime.as_secs() % 3600) / 60,
                uptime.as_secs() % 60
            ))
        }
        "/help" => text(HELP),
        "/quit" => Reply::Quit,
        "" => text(""),
        _ => text("🤖 Unknown command. Type /help for a list of commands."),
    }
}

/// Splits `"<amount> <item name>"`; the item name may contain spaces.
fn split_amount(args: &str) -> Option<(&str, &str)> {
    let (amount, name) = args.split_once(char::is_whitespace)?;
    let name = name.trim();
    (!name.is_empty()).then_some((amount, name))
}
