//! Construction parameters for negotiation sessions

use crate::error::{BargainError, Result};
use crate::negotiation::discounts::DiscountPolicy;
use crate::types::Locale;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A product offered for negotiation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    pub name: String,
    pub ideal_price: Decimal,
    pub min_price: Decimal,
}

impl ProductListing {
    /// Load a listing from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let listing: ProductListing = serde_json::from_str(&raw)?;
        Ok(listing)
    }
}

impl Default for ProductListing {
    fn default() -> Self {
        Self {
            name: "Hand-carved wooden bowl".to_string(),
            ideal_price: Decimal::from(5000),
            min_price: Decimal::from(3500),
        }
    }
}

/// Everything needed to open a negotiation session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub product_name: String,
    pub ideal_price: Decimal,
    pub min_price: Decimal,
    #[serde(default)]
    pub customer_locale: Locale,
    #[serde(default)]
    pub seller_locale: Locale,
    #[serde(default)]
    pub loyalty_points: u32,
    #[serde(default)]
    pub discount_rules: DiscountPolicy,
    /// Names of promotion rules currently running
    #[serde(default)]
    pub active_promotions: HashSet<String>,
}

impl SessionConfig {
    pub fn new(product_name: impl Into<String>, ideal_price: Decimal, min_price: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            ideal_price,
            min_price,
            customer_locale: Locale::default(),
            seller_locale: Locale::default(),
            loyalty_points: 0,
            discount_rules: DiscountPolicy::default(),
            active_promotions: HashSet::new(),
        }
    }

    pub fn from_listing(listing: ProductListing) -> Self {
        Self::new(listing.name, listing.ideal_price, listing.min_price)
    }

    /// Parse a full session configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_locales(mut self, customer: Locale, seller: Locale) -> Self {
        self.customer_locale = customer;
        self.seller_locale = seller;
        self
    }

    pub fn with_loyalty_points(mut self, points: u32) -> Self {
        self.loyalty_points = points;
        self
    }

    pub fn with_discount_rules(mut self, rules: DiscountPolicy) -> Self {
        self.discount_rules = rules;
        self
    }

    pub fn with_active_promotions<I, S>(mut self, promotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_promotions = promotions.into_iter().map(Into::into).collect();
        self
    }

    /// Reject price bounds and rates a session cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.ideal_price <= Decimal::ZERO {
            return Err(BargainError::NonPositivePrice {
                field: "ideal_price",
                value: self.ideal_price,
            });
        }
        if self.min_price <= Decimal::ZERO {
            return Err(BargainError::NonPositivePrice {
                field: "min_price",
                value: self.min_price,
            });
        }
        if self.min_price > self.ideal_price {
            return Err(BargainError::FloorAboveIdeal {
                min_price: self.min_price,
                ideal_price: self.ideal_price,
            });
        }
        self.discount_rules.validate()
    }
}
