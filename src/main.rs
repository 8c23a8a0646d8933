use basket_comparator::analyzer::{compute_basket, summarize};
use basket_comparator::config::load_config;
use basket_comparator::console::listener::listen_for_commands;
use basket_comparator::console::render::{render_basket, render_header, render_offers, render_summary};
use basket_comparator::console::Console;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    // Logs go to stderr; stdout is the report
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Offers: {} | Catalog: {}",
        config.offers_path.display(),
        config.catalog_path.display()
    );

    let mut console = Console::new(config);
    println!("{}", render_header(&console.config));

    // A broken data source only blanks its own view
    match console.offers() {
        Ok(offers) => {
            let summary = summarize(&offers);
            println!("{}", render_summary(&console.config, summary.as_ref(), offers.len()));
            println!("{}", render_offers(&console.config, &offers, console.config.top_offers));
        }
        Err(e) => {
            error!("Failed to load offers: {}", e);
            println!("❌ Offers unavailable: {e}\n");
        }
    }

    match console.catalog() {
        Ok(catalog) => {
            let basket = compute_basket(&catalog, &console.basket);
            println!("{}", render_basket(&console.config, &basket));
        }
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            println!("❌ Catalog unavailable: {e}\n");
        }
    }

    println!("Type /help for commands.");
    let stdin = io::stdin();
    if let Err(e) = listen_for_commands(&mut console, stdin.lock(), io::stdout()) {
        error!("Console I/O error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
