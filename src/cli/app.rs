//! Terminal chat driving one negotiation turn by turn

use crate::chooser::RandomChooser;
use crate::config::{ProductListing, SessionConfig};
use crate::error::{BargainError, Result};
use crate::negotiation::{NegotiationDesk, SharedLocalizer};
use crate::types::{parse_offer, Language};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// What a chat needs beyond the product itself
#[derive(Clone, Debug, Default)]
pub struct ChatSettings {
    pub listing: ProductListing,
    pub customer: Option<Language>,
    pub seller: Option<Language>,
    pub loyalty_points: u32,
    pub active_promotions: HashSet<String>,
    pub seed: Option<u64>,
}

/// How a chat ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Deal { final_price: Decimal, rounds: u32 },
    /// Input ended before an offer was accepted
    Abandoned { last_ask: Option<Decimal> },
}

/// Interactive bargaining front end
pub struct ChatApp {
    desk: NegotiationDesk,
}

impl ChatApp {
    pub fn new(localizer: SharedLocalizer) -> Self {
        Self {
            desk: NegotiationDesk::new(localizer),
        }
    }

    /// Run one negotiation until a deal is struck or input ends
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        settings: ChatSettings,
        input: &mut R,
        output: &mut W,
    ) -> Result<ChatOutcome> {
        let Some(seller) = resolve_language(settings.seller, "Seller", input, output)? else {
            return Ok(ChatOutcome::Abandoned { last_ask: None });
        };
        let Some(customer) = resolve_language(settings.customer, "Customer", input, output)? else {
            return Ok(ChatOutcome::Abandoned { last_ask: None });
        };
        writeln!(output, "--------------------------------------------------")?;

        let config = SessionConfig::from_listing(settings.listing)
            .with_locales(customer.locale(), seller.locale())
            .with_loyalty_points(settings.loyalty_points)
            .with_active_promotions(settings.active_promotions);
        let chooser = match settings.seed {
            Some(seed) => RandomChooser::seeded(seed),
            None => RandomChooser::from_entropy(),
        };
        let session_id = self.desk.open(config, Box::new(chooser))?;

        let session = self
            .desk
            .get(&session_id)
            .ok_or_else(|| BargainError::SessionNotFound(session_id.0.clone()))?;
        writeln!(output, "Bargaining Chatbot Initializing...")?;
        writeln!(output, "{}", session.opening_message())?;

        let mut line = String::new();
        loop {
            write!(output, "({}) > ", customer.code())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            let session = self
                .desk
                .get(&session_id)
                .ok_or_else(|| BargainError::SessionNotFound(session_id.0.clone()))?;

            let offer = match parse_offer(&line) {
                Ok(offer) => offer,
                Err(BargainError::InvalidOffer(raw)) => {
                    tracing::debug!("Ignoring unparseable offer {:?}", raw);
                    writeln!(output, "Chatbot > {}", session.invalid_price_message())?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            writeln!(output, "{}", session.seller_notice(offer))?;

            let response = self.desk.submit(&session_id, offer)?;
            writeln!(output, "Chatbot > {}", response.text)?;
            if response.is_closed() {
                break;
            }
        }

        let session = self.desk.close(&session_id)?;
        writeln!(output, "{}", session.goodbye_message())?;

        Ok(match session.final_price() {
            Some(final_price) => ChatOutcome::Deal {
                final_price,
                rounds: session.rounds(),
            },
            None => ChatOutcome::Abandoned {
                last_ask: Some(session.current_price()),
            },
        })
    }
}

/// Use the given language, or keep asking until a known one is typed
fn resolve_language<R: BufRead, W: Write>(
    given: Option<Language>,
    who: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Language>> {
    if given.is_some() {
        return Ok(given);
    }

    let names: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
    let mut line = String::new();
    loop {
        write!(output, "{}, please choose your language ({}): ", who, names.join(", "))?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }
        if let Ok(language) = line.parse::<Language>() {
            return Ok(Some(language));
        }
    }
}

/// Print every supported language with its locale code
pub fn list_languages<W: Write>(output: &mut W) -> Result<()> {
    for language in Language::ALL {
        writeln!(output, "{} ({})", language.name(), language.code())?;
    }
    Ok(())
}
