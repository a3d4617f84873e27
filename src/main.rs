//! Bazaar CLI binary

use anyhow::Context;
use bazaar::cli::{list_languages, ChatApp, ChatArgs, ChatOutcome, ChatSettings, Cli, Commands};
use bazaar::{MessageCatalog, ProductListing, PromotionCalendar};
use chrono::Datelike;
use clap::Parser;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the chat transcript on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat(args) => chat(args)?,
        Commands::Languages => list_languages(&mut std::io::stdout().lock())?,
    }

    Ok(())
}

fn chat(args: ChatArgs) -> anyhow::Result<()> {
    let mut listing = match &args.product {
        Some(path) => ProductListing::from_file(path)
            .with_context(|| format!("loading product listing {}", path.display()))?,
        None => ProductListing::default(),
    };
    if let Some(name) = args.name {
        listing.name = name;
    }
    if let Some(ideal_price) = args.ideal_price {
        listing.ideal_price = ideal_price;
    }
    if let Some(min_price) = args.min_price {
        listing.min_price = min_price;
    }

    let mut catalog = MessageCatalog::builtin()?;
    if let Some(path) = &args.messages {
        let extra = MessageCatalog::from_file(catalog.default_locale().clone(), path)
            .with_context(|| format!("loading message catalog {}", path.display()))?;
        catalog.merge(extra);
    }

    let calendar = PromotionCalendar::new(args.festival_month)?;
    let mut active_promotions = calendar.active_promotions(chrono::Local::now().month());
    active_promotions.extend(args.promotions);
    tracing::info!("Active promotions: {:?}", active_promotions);

    let settings = ChatSettings {
        listing,
        customer: args.customer_lang,
        seller: args.seller_lang,
        loyalty_points: args.loyalty_points,
        active_promotions,
        seed: args.seed,
    };

    let mut app = ChatApp::new(Arc::new(catalog));
    let outcome = app.run(
        settings,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )?;

    match outcome {
        ChatOutcome::Deal { final_price, rounds } => {
            tracing::info!("Deal closed at {} after {} round(s)", final_price, rounds);
        }
        ChatOutcome::Abandoned { last_ask } => {
            tracing::info!("Negotiation abandoned (last ask: {:?})", last_ask);
        }
    }

    Ok(())
}
