//! Bazaar bargaining engine
//!
//! A deterministic price-negotiation engine for artisan marketplaces:
//! - Multi-round offer / counter-offer sessions with a hard floor price
//! - Compounding promotion and loyalty discounts on acceptance
//! - Pluggable localized phrasing with an injectable phrase chooser

pub mod chooser;
pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod negotiation;
pub mod types;

// Re-export commonly used types
pub use chooser::{FixedChooser, PhraseChooser, RandomChooser, SequenceChooser};
pub use config::{ProductListing, SessionConfig};
pub use error::{BargainError, Result};
pub use i18n::{Arg, Localizer, MessageCatalog};
pub use negotiation::{
    DiscountPolicy, DiscountRule, NegotiationDesk, NegotiationSession, NegotiationState,
    OfferResponse, Outcome, PromotionCalendar,
};
pub use types::{Language, Locale, SessionId};
