//! Localization provider used to phrase every negotiation message

pub mod catalog;
pub mod format;

pub use catalog::{Entry, LocaleTable, MessageCatalog};
pub use format::{render, Arg};

use crate::types::Locale;

/// Message identifiers understood by the built-in catalog
pub mod keys {
    pub const WELCOME: &str = "welcome";
    pub const ORIGINAL_PRICE: &str = "original_price";
    pub const OFFER_ACCEPTED: &str = "offer_accepted";
    pub const GOODBYE: &str = "goodbye";
    pub const FESTIVAL_DISCOUNT: &str = "discount_applied";
    pub const LOYALTY_DISCOUNT: &str = "loyalty_discount";
    pub const CURRENT_PRICE: &str = "current_price";
    pub const INVALID_PRICE: &str = "invalid_price";
    pub const SELLER_OFFER_RECEIVED: &str = "seller_offer_received";
    pub const OFFER_TOO_LOW_OPTIONS: &str = "offer_too_low_options";
    pub const COUNTER_OFFER_OPTIONS: &str = "counter_offer_options";
}

/// Source of localized text.
///
/// Lookups never fail: an unknown locale resolves through the provider's
/// default locale and a key missing from the resolved table comes back
/// unchanged.
pub trait Localizer {
    /// Render a single message
    fn lookup(&self, key: &str, locale: &Locale, args: &[Arg]) -> String;

    /// Unrendered templates for a message with several phrasings
    fn lookup_choices(&self, key: &str, locale: &Locale) -> Vec<String>;

    /// Whether `locale` has its own messages rather than falling back
    fn supports_locale(&self, _locale: &Locale) -> bool {
        true
    }
}
