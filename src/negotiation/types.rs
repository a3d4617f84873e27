//! Negotiation types and state machine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::discounts::AppliedDiscount;

/// Negotiation state machine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationState {
    /// Offers are still being exchanged
    Negotiating,
    /// A customer offer was accepted; terminal
    Accepted { final_price: Decimal },
}

impl NegotiationState {
    /// Check if negotiation is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, NegotiationState::Accepted { .. })
    }

    /// Check if negotiation is active
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// What the engine decided for one customer offer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Accepted {
        offer: Decimal,
        final_price: Decimal,
        discounts: Vec<AppliedDiscount>,
    },
    /// Offer fell below the floor price
    Rejected { offer: Decimal },
    /// Asking price moved to the midpoint of the offer and the previous ask
    Countered { offer: Decimal, counter: Decimal },
}

/// Reply to a single customer offer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferResponse {
    pub text: String,
    pub outcome: Outcome,
}

impl OfferResponse {
    /// Whether the session is closed after this offer
    pub fn is_closed(&self) -> bool {
        matches!(self.outcome, Outcome::Accepted { .. })
    }
}
