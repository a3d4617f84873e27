//! Negotiation session: one product, one customer, one asking price

use crate::chooser::PhraseChooser;
use crate::config::SessionConfig;
use crate::error::{BargainError, Result};
use crate::i18n::{keys, render, Arg, Localizer};
use crate::types::Locale;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::discounts::{DiscountPolicy, EligibilityContext};
use super::types::{NegotiationState, OfferResponse, Outcome};

/// Shared handle to a localization provider
pub type SharedLocalizer = Arc<dyn Localizer + Send + Sync>;

/// A price negotiation for a single product
pub struct NegotiationSession {
    product_name: String,
    ideal_price: Decimal,
    min_price: Decimal,
    current_price: Decimal,
    customer_locale: Locale,
    seller_locale: Locale,
    loyalty_points: u32,
    discounts: DiscountPolicy,
    active_promotions: HashSet<String>,
    state: NegotiationState,
    rounds: u32,
    localizer: SharedLocalizer,
    chooser: Box<dyn PhraseChooser + Send>,
}

impl NegotiationSession {
    /// Open a session asking the ideal price
    pub fn new(
        config: SessionConfig,
        localizer: SharedLocalizer,
        chooser: Box<dyn PhraseChooser + Send>,
    ) -> Result<Self> {
        config.validate()?;

        for locale in [&config.customer_locale, &config.seller_locale] {
            if !localizer.supports_locale(locale) {
                tracing::warn!("No messages for locale '{}', using the default locale", locale);
            }
        }

        Ok(Self {
            product_name: config.product_name,
            ideal_price: config.ideal_price,
            min_price: config.min_price,
            current_price: config.ideal_price,
            customer_locale: config.customer_locale,
            seller_locale: config.seller_locale,
            loyalty_points: config.loyalty_points,
            discounts: config.discount_rules,
            active_promotions: config.active_promotions,
            state: NegotiationState::Negotiating,
            rounds: 0,
            localizer,
            chooser,
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn ideal_price(&self) -> Decimal {
        self.ideal_price
    }

    pub fn min_price(&self) -> Decimal {
        self.min_price
    }

    /// Current asking price
    pub fn current_price(&self) -> Decimal {
        self.current_price
    }

    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    pub fn is_accepted(&self) -> bool {
        self.state.is_terminal()
    }

    /// Final price after discounts, once accepted
    pub fn final_price(&self) -> Option<Decimal> {
        match self.state {
            NegotiationState::Accepted { final_price } => Some(final_price),
            NegotiationState::Negotiating => None,
        }
    }

    /// Number of offers processed so far
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn customer_locale(&self) -> &Locale {
        &self.customer_locale
    }

    pub fn seller_locale(&self) -> &Locale {
        &self.seller_locale
    }

    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }

    pub fn set_loyalty_points(&mut self, points: u32) {
        self.loyalty_points = points;
    }

    /// Decide on a customer offer: accept, reject, or counter
    pub fn process_offer(&mut self, offer: Decimal) -> Result<OfferResponse> {
        if let NegotiationState::Accepted { final_price } = self.state {
            return Err(BargainError::SessionClosed { final_price });
        }

        self.rounds += 1;
        tracing::debug!(
            "Round {} for {}: offer {} against ask {}",
            self.rounds,
            self.product_name,
            offer,
            self.current_price
        );

        if offer >= self.current_price {
            Ok(self.accept(offer))
        } else if offer < self.min_price {
            Ok(self.reject(offer))
        } else {
            Ok(self.counter(offer))
        }
    }

    fn accept(&mut self, offer: Decimal) -> OfferResponse {
        let ctx = EligibilityContext {
            active_promotions: &self.active_promotions,
            loyalty_points: self.loyalty_points,
        };
        let (final_price, discounts) = self.discounts.apply(offer, &ctx);

        self.state = NegotiationState::Accepted { final_price };
        tracing::info!(
            "Deal on {} at {} (offer {}, {} discount(s))",
            self.product_name,
            final_price,
            offer,
            discounts.len()
        );

        let mut lines = vec![self.customer_text(keys::OFFER_ACCEPTED, &[Arg::Price(final_price)])];
        lines.extend(
            discounts
                .iter()
                .map(|d| self.customer_text(&d.message_key, &[Arg::Percent(d.percent)])),
        );

        OfferResponse {
            text: lines.join("\n"),
            outcome: Outcome::Accepted {
                offer,
                final_price,
                discounts,
            },
        }
    }

    fn reject(&mut self, offer: Decimal) -> OfferResponse {
        tracing::debug!("Offer {} is below floor {}", offer, self.min_price);

        OfferResponse {
            text: self.pick_phrase(keys::OFFER_TOO_LOW_OPTIONS, &[]),
            outcome: Outcome::Rejected { offer },
        }
    }

    fn counter(&mut self, offer: Decimal) -> OfferResponse {
        // min_price <= offer < current_price here, so the gap cannot overflow
        let counter = offer + (self.current_price - offer) / Decimal::TWO;
        self.current_price = counter;
        tracing::debug!("Countering {} with {}", offer, counter);

        OfferResponse {
            text: self.pick_phrase(
                keys::COUNTER_OFFER_OPTIONS,
                &[Arg::Price(offer), Arg::Price(counter)],
            ),
            outcome: Outcome::Countered { offer, counter },
        }
    }

    fn pick_phrase(&mut self, key: &str, args: &[Arg]) -> String {
        let choices = self.localizer.lookup_choices(key, &self.customer_locale);
        let index = self.chooser.choose(choices.len());
        match choices.get(index).or_else(|| choices.first()) {
            Some(template) => render(template, args),
            None => key.to_string(),
        }
    }

    fn customer_text(&self, key: &str, args: &[Arg]) -> String {
        self.localizer.lookup(key, &self.customer_locale, args)
    }

    /// Greeting naming the product
    pub fn welcome_message(&self) -> String {
        self.customer_text(keys::WELCOME, &[Arg::text(self.product_name.clone())])
    }

    /// Opening line quoting the ideal price
    pub fn opening_message(&self) -> String {
        self.customer_text(
            keys::ORIGINAL_PRICE,
            &[Arg::text(self.product_name.clone()), Arg::Price(self.ideal_price)],
        )
    }

    /// Reminder of the current asking price
    pub fn current_price_message(&self) -> String {
        self.customer_text(
            keys::CURRENT_PRICE,
            &[Arg::text(self.product_name.clone()), Arg::Price(self.current_price)],
        )
    }

    pub fn invalid_price_message(&self) -> String {
        self.customer_text(keys::INVALID_PRICE, &[])
    }

    pub fn goodbye_message(&self) -> String {
        self.customer_text(keys::GOODBYE, &[])
    }

    /// Offer notice shown to the seller, in the seller's language
    pub fn seller_notice(&self, offer: Decimal) -> String {
        self.localizer
            .lookup(keys::SELLER_OFFER_RECEIVED, &self.seller_locale, &[Arg::Price(offer)])
    }
}

impl fmt::Debug for NegotiationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NegotiationSession")
            .field("product_name", &self.product_name)
            .field("ideal_price", &self.ideal_price)
            .field("min_price", &self.min_price)
            .field("current_price", &self.current_price)
            .field("customer_locale", &self.customer_locale)
            .field("seller_locale", &self.seller_locale)
            .field("loyalty_points", &self.loyalty_points)
            .field("state", &self.state)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::{FixedChooser, RandomChooser, SequenceChooser};
    use crate::config::ProductListing;
    use crate::i18n::MessageCatalog;
    use crate::negotiation::discounts::{DiscountRule, FESTIVAL_RULE, LOYALTY_RULE};

    fn catalog() -> SharedLocalizer {
        Arc::new(MessageCatalog::builtin().unwrap())
    }

    fn bowl_config() -> SessionConfig {
        SessionConfig::from_listing(ProductListing::default())
    }

    fn bowl_session() -> NegotiationSession {
        NegotiationSession::new(bowl_config(), catalog(), Box::new(FixedChooser(0))).unwrap()
    }

    fn price(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_session_starts_at_ideal_price() {
        let session = bowl_session();

        assert_eq!(session.current_price(), price(5000));
        assert_eq!(session.state(), &NegotiationState::Negotiating);
        assert!(!session.is_accepted());
        assert_eq!(session.final_price(), None);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = SessionConfig::new("bowl", price(3000), price(3500));
        let result = NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0)));
        assert!(matches!(result, Err(BargainError::FloorAboveIdeal { .. })));
    }

    #[test]
    fn test_offer_at_ideal_price_accepts() {
        let mut session = bowl_session();

        let response = session.process_offer(price(5000)).unwrap();

        assert!(response.is_closed());
        assert!(session.is_accepted());
        assert_eq!(session.final_price(), Some(price(5000)));
        assert_eq!(response.text, "Excellent! We have a deal. The final price is ₹5000.");
    }

    #[test]
    fn test_offer_above_ask_accepts_at_offer() {
        let mut session = bowl_session();

        session.process_offer(price(5200)).unwrap();

        assert_eq!(session.final_price(), Some(price(5200)));
        assert_eq!(session.current_price(), price(5000));
    }

    #[test]
    fn test_counter_offer_midpoint_then_accept() {
        let mut session = bowl_session();

        let response = session.process_offer(price(4000)).unwrap();
        assert_eq!(
            response.outcome,
            Outcome::Countered {
                offer: price(4000),
                counter: price(4500)
            }
        );
        assert_eq!(session.current_price(), price(4500));
        assert_eq!(
            response.text,
            "Thank you for your offer of ₹4000. That is a bit low. How about we meet in the middle at ₹4500?"
        );

        let response = session.process_offer(price(4500)).unwrap();
        assert!(response.is_closed());
        assert_eq!(session.final_price(), Some(price(4500)));
    }

    #[test]
    fn test_single_slot_phrasing_quotes_counter_price() {
        let mut session =
            NegotiationSession::new(bowl_config(), catalog(), Box::new(FixedChooser(3))).unwrap();

        let response = session.process_offer(price(4000)).unwrap();

        assert_eq!(
            response.text,
            "I cannot accept that price. However, I can offer you a counter-price of ₹4500."
        );
    }

    #[test]
    fn test_counter_near_decimal_max_does_not_overflow() {
        let config = SessionConfig::new("x", Decimal::MAX, Decimal::ONE);
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();
        let offer = Decimal::MAX - Decimal::ONE;

        let response = session.process_offer(offer).unwrap();

        assert!(matches!(response.outcome, Outcome::Countered { .. }));
        assert!(session.current_price() >= offer);
        assert!(session.current_price() <= Decimal::MAX);
    }

    #[test]
    fn test_discount_percent_has_no_decimal_point() {
        let config = bowl_config().with_active_promotions([FESTIVAL_RULE]);
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        let response = session.process_offer(price(5000)).unwrap();

        assert!(response.text.contains("an additional 10% discount"));
        assert!(!response.text.contains("10.0%"));
    }

    #[test]
    fn test_offer_at_floor_counters() {
        let mut session = bowl_session();

        let response = session.process_offer(price(3500)).unwrap();

        assert!(matches!(response.outcome, Outcome::Countered { .. }));
        assert_eq!(session.current_price(), price(4250));
    }

    #[test]
    fn test_offer_below_floor_rejects() {
        let mut session = bowl_session();

        let response = session.process_offer(price(3499)).unwrap();

        assert_eq!(response.outcome, Outcome::Rejected { offer: price(3499) });
        assert_eq!(session.current_price(), price(5000));
        assert!(!session.is_accepted());
        assert_eq!(
            response.text,
            "That offer is too low. Please try again with a higher offer."
        );
    }

    #[test]
    fn test_negative_offer_rejects() {
        let mut session = bowl_session();
        let response = session.process_offer(price(-10)).unwrap();
        assert!(matches!(response.outcome, Outcome::Rejected { .. }));
    }

    #[test]
    fn test_rejection_phrasing_follows_chooser() {
        let mut session = NegotiationSession::new(
            bowl_config(),
            catalog(),
            Box::new(SequenceChooser::new(vec![1, 2])),
        )
        .unwrap();

        let first = session.process_offer(price(100)).unwrap();
        let second = session.process_offer(price(100)).unwrap();

        assert_eq!(
            first.text,
            "We can't accept that. Our minimum price is higher than your offer. Please try again."
        );
        assert_eq!(
            second.text,
            "Your offer is too low to be considered. What's your next price?"
        );
    }

    #[test]
    fn test_price_stays_within_bounds_and_never_rises() {
        let mut session = NegotiationSession::new(
            bowl_config(),
            catalog(),
            Box::new(RandomChooser::seeded(3)),
        )
        .unwrap();
        let offers = [3000, 3600, 3400, 3700, 4100, 3500, 4000, 100, 4200, 4300];

        let mut previous = session.current_price();
        for offer in offers {
            let response = session.process_offer(price(offer)).unwrap();
            if response.is_closed() {
                break;
            }
            let current = session.current_price();
            assert!(current <= previous, "{} rose above {}", current, previous);
            assert!(current >= session.min_price());
            assert!(current <= session.ideal_price());
            previous = current;
        }
    }

    #[test]
    fn test_discounts_compound_on_accept() {
        let config = bowl_config()
            .with_loyalty_points(100)
            .with_active_promotions([FESTIVAL_RULE]);
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        let response = session.process_offer(price(5000)).unwrap();

        assert_eq!(session.final_price(), Some(price(4275)));
        let lines: Vec<&str> = response.text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Excellent! We have a deal. The final price is ₹4275.",
                "Based on our ongoing festival offer, an additional 10% discount has been applied!",
                "Thank you for being a loyal customer! An additional 5% discount has been applied for your loyalty points!",
            ]
        );
        match response.outcome {
            Outcome::Accepted { discounts, offer, .. } => {
                assert_eq!(offer, price(5000));
                let names: Vec<&str> = discounts.iter().map(|d| d.name.as_str()).collect();
                assert_eq!(names, vec![FESTIVAL_RULE, LOYALTY_RULE]);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_discount_applies_to_offer_not_ask() {
        let config = bowl_config().with_active_promotions([FESTIVAL_RULE]);
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        session.process_offer(price(6000)).unwrap();

        assert_eq!(session.final_price(), Some(price(5400)));
    }

    #[test]
    fn test_loyalty_set_after_open_counts() {
        let mut session = bowl_session();
        session.set_loyalty_points(51);

        session.process_offer(price(5000)).unwrap();

        assert_eq!(session.final_price(), Some(price(4750)));
    }

    #[test]
    fn test_custom_rules_follow_configured_order() {
        let rules = DiscountPolicy::new(vec![
            DiscountRule::loyalty(Decimal::new(20, 2), 0),
            DiscountRule::festival(Decimal::new(50, 2)),
        ])
        .unwrap();
        let config = bowl_config()
            .with_discount_rules(rules)
            .with_loyalty_points(1)
            .with_active_promotions([FESTIVAL_RULE]);
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        let response = session.process_offer(price(5000)).unwrap();

        assert_eq!(session.final_price(), Some(price(2000)));
        let lines: Vec<&str> = response.text.lines().collect();
        assert!(lines[1].contains("20%"));
        assert!(lines[2].contains("50%"));
    }

    #[test]
    fn test_no_mutation_after_acceptance() {
        let mut session = bowl_session();
        session.process_offer(price(4000)).unwrap();
        session.process_offer(price(4500)).unwrap();
        let rounds = session.rounds();

        let result = session.process_offer(price(4400));

        assert!(matches!(
            result,
            Err(BargainError::SessionClosed { final_price }) if final_price == price(4500)
        ));
        assert_eq!(session.current_price(), price(4500));
        assert_eq!(session.final_price(), Some(price(4500)));
        assert_eq!(session.rounds(), rounds);
    }

    #[test]
    fn test_final_price_not_written_to_current_price() {
        let config = bowl_config().with_active_promotions([FESTIVAL_RULE]);
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        session.process_offer(price(5000)).unwrap();

        assert_eq!(session.current_price(), price(5000));
        assert_eq!(session.final_price(), Some(price(4500)));
    }

    #[test]
    fn test_messages_use_each_party_locale() {
        let config = bowl_config().with_locales(Locale::new("hi"), Locale::new("te"));
        let session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        assert_eq!(
            session.opening_message(),
            "इस Hand-carved wooden bowl की मूल कीमत ₹5000 है। आपकी पहली पेशकश क्या है?"
        );
        assert_eq!(
            session.seller_notice(price(4000)),
            "విక్రేత: కస్టమర్ ఆఫర్ స్వీకరించబడింది: ₹4000"
        );
    }

    #[test]
    fn test_unknown_customer_locale_uses_english() {
        let config = bowl_config().with_locales(Locale::new("fr"), Locale::new("en"));
        let mut session =
            NegotiationSession::new(config, catalog(), Box::new(FixedChooser(0))).unwrap();

        assert_eq!(session.invalid_price_message(), "Please enter a valid price.");
        let response = session.process_offer(price(5000)).unwrap();
        assert_eq!(response.text, "Excellent! We have a deal. The final price is ₹5000.");
    }

    #[test]
    fn test_welcome_and_goodbye() {
        let session = bowl_session();

        assert_eq!(
            session.welcome_message(),
            "Hello! I am the AI bargaining assistant for this beautiful Hand-carved wooden bowl. What is your offer?"
        );
        assert_eq!(
            session.goodbye_message(),
            "Thank you for your interest! Have a wonderful day!"
        );
    }

    #[test]
    fn test_current_price_message_tracks_counter() {
        let mut session = bowl_session();
        session.process_offer(price(4000)).unwrap();

        assert_eq!(
            session.current_price_message(),
            "The current price for the Hand-carved wooden bowl is ₹4500. What's your next offer?"
        );
    }
}
