//! Error types for Bazaar

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for Bazaar
#[derive(Error, Debug)]
pub enum BargainError {
    // Configuration errors
    #[error("Price must be positive: {field} = {value}")]
    NonPositivePrice { field: &'static str, value: Decimal },

    #[error("Minimum price {min_price} exceeds ideal price {ideal_price}")]
    FloorAboveIdeal {
        min_price: Decimal,
        ideal_price: Decimal,
    },

    #[error("Discount rate for '{name}' must be in [0, 1): {rate}")]
    InvalidDiscountRate { name: String, rate: Decimal },

    #[error("Invalid festival month: {0}")]
    InvalidMonth(u32),

    // Negotiation errors
    #[error("Negotiation session not found: {0}")]
    SessionNotFound(String),

    #[error("Negotiation already closed at final price {final_price}")]
    SessionClosed { final_price: Decimal },

    // Driver errors
    #[error("Invalid offer: {0:?}")]
    InvalidOffer(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    // Localization errors
    #[error("Invalid message catalog: {0}")]
    Catalog(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Bazaar operations
pub type Result<T> = std::result::Result<T, BargainError>;
