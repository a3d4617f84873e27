//! CLI command definitions

use crate::types::Language;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bazaar")]
#[command(about = "Bazaar - bargaining assistant for artisan marketplaces", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bargain over a product in the terminal
    Chat(ChatArgs),

    /// List supported languages
    Languages,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Product listing JSON file (name, ideal_price, min_price)
    #[arg(short = 'f', long)]
    pub product: Option<PathBuf>,

    /// Product name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Opening asking price
    #[arg(short = 'P', long)]
    pub ideal_price: Option<Decimal>,

    /// Lowest acceptable price
    #[arg(short = 'p', long)]
    pub min_price: Option<Decimal>,

    /// Customer language (prompted for when omitted)
    #[arg(short, long)]
    pub customer_lang: Option<Language>,

    /// Seller language (prompted for when omitted)
    #[arg(short, long)]
    pub seller_lang: Option<Language>,

    /// Customer loyalty points
    #[arg(short, long, default_value = "0")]
    pub loyalty_points: u32,

    /// Force a promotion rule active (repeatable)
    #[arg(long = "promotion")]
    pub promotions: Vec<String>,

    /// Month (1-12) in which the festival promotion runs
    #[arg(long, default_value = "12")]
    pub festival_month: u32,

    /// Seed for phrasing choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra message catalog JSON merged over the built-in one
    #[arg(short, long)]
    pub messages: Option<PathBuf>,
}
