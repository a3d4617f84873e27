//! Core types used throughout Bazaar

use crate::error::{BargainError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency symbol customers may prefix their offers with
pub const CURRENCY_SYMBOL: char = '₹';

/// Identifier for a negotiation hosted by a desk
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Build the id for the n-th session opened on a desk
    pub fn sequential(n: u64) -> Self {
        Self(format!("session_{}", n))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locale code understood by the localization provider (e.g. "en", "te")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(pub String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Language::English.locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Languages shipped with the built-in message catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Telugu,
    Hindi,
    Punjabi,
    Bengali,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Telugu,
        Language::Hindi,
        Language::Punjabi,
        Language::Bengali,
    ];

    /// Name a user types to pick this language
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Telugu => "telugu",
            Language::Hindi => "hindi",
            Language::Punjabi => "punjabi",
            Language::Bengali => "bengali",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
            Language::Hindi => "hi",
            Language::Punjabi => "pa",
            Language::Bengali => "bn",
        }
    }

    pub fn locale(&self) -> Locale {
        Locale::new(self.code())
    }
}

impl FromStr for Language {
    type Err = BargainError;

    /// Accepts either the language name or its locale code, case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.name() == wanted || lang.code() == wanted)
            .ok_or_else(|| BargainError::UnknownLanguage(s.trim().to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse a raw customer offer such as "₹4500" or " 4200.50 "
pub fn parse_offer(input: &str) -> Result<Decimal> {
    let trimmed = input.trim().trim_matches(CURRENCY_SYMBOL).trim();
    Decimal::from_str(trimmed).map_err(|_| BargainError::InvalidOffer(input.trim().to_string()))
}
