//! Negotiation module for multi-round price bargaining

pub mod discounts;
pub mod engine;
pub mod session;
pub mod types;

pub use discounts::{
    AppliedDiscount, DiscountPolicy, DiscountRule, DiscountTrigger, EligibilityContext,
    PromotionCalendar,
};
pub use engine::NegotiationDesk;
pub use session::{NegotiationSession, SharedLocalizer};
pub use types::{NegotiationState, OfferResponse, Outcome};
