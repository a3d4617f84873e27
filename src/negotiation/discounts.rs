//! Discounts applied to an accepted offer

use crate::error::{BargainError, Result};
use crate::i18n::keys;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Loyalty points a customer must exceed to earn the loyalty discount
pub const DEFAULT_LOYALTY_THRESHOLD: u32 = 50;

/// Month (1-12) in which the festival promotion runs by default
pub const DEFAULT_FESTIVAL_MONTH: u32 = 12;

pub const FESTIVAL_RULE: &str = "festival";
pub const LOYALTY_RULE: &str = "loyalty";

/// What makes a discount rule eligible
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountTrigger {
    /// Eligible while the rule's name is among the active promotions
    Promotion,
    /// Eligible when the customer holds more than `min_points`
    Loyalty { min_points: u32 },
}

/// A named fractional price reduction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub name: String,
    /// Fraction of the price taken off, in [0, 1)
    pub rate: Decimal,
    pub trigger: DiscountTrigger,
    /// Catalog key of the notification line, given the percentage
    pub message_key: String,
}

impl DiscountRule {
    pub fn festival(rate: Decimal) -> Self {
        Self {
            name: FESTIVAL_RULE.to_string(),
            rate,
            trigger: DiscountTrigger::Promotion,
            message_key: keys::FESTIVAL_DISCOUNT.to_string(),
        }
    }

    pub fn loyalty(rate: Decimal, min_points: u32) -> Self {
        Self {
            name: LOYALTY_RULE.to_string(),
            rate,
            trigger: DiscountTrigger::Loyalty { min_points },
            message_key: keys::LOYALTY_DISCOUNT.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate < Decimal::ZERO || self.rate >= Decimal::ONE {
            return Err(BargainError::InvalidDiscountRate {
                name: self.name.clone(),
                rate: self.rate,
            });
        }
        Ok(())
    }

    pub fn is_eligible(&self, ctx: &EligibilityContext<'_>) -> bool {
        match &self.trigger {
            DiscountTrigger::Promotion => ctx.active_promotions.contains(&self.name),
            DiscountTrigger::Loyalty { min_points } => ctx.loyalty_points > *min_points,
        }
    }

    /// Rate expressed as a percentage (0.10 -> 10)
    pub fn percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).normalize()
    }
}

/// External signals a discount decision depends on
#[derive(Clone, Copy, Debug)]
pub struct EligibilityContext<'a> {
    pub active_promotions: &'a HashSet<String>,
    pub loyalty_points: u32,
}

/// A discount that was applied to a final price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub name: String,
    pub rate: Decimal,
    pub percent: Decimal,
    pub message_key: String,
}

/// Ordered set of discount rules
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountPolicy {
    rules: Vec<DiscountRule>,
}

impl DiscountPolicy {
    pub fn new(rules: Vec<DiscountRule>) -> Result<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    /// No discounts at all
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.iter().try_for_each(DiscountRule::validate)
    }

    /// Compound every eligible rule onto `price`, in rule order
    pub fn apply(
        &self,
        price: Decimal,
        ctx: &EligibilityContext<'_>,
    ) -> (Decimal, Vec<AppliedDiscount>) {
        let mut final_price = price;
        let mut applied = Vec::new();

        for rule in self.rules.iter().filter(|rule| rule.is_eligible(ctx)) {
            final_price *= Decimal::ONE - rule.rate;
            applied.push(AppliedDiscount {
                name: rule.name.clone(),
                rate: rule.rate,
                percent: rule.percent(),
                message_key: rule.message_key.clone(),
            });
        }

        (final_price, applied)
    }
}

impl Default for DiscountPolicy {
    /// 10% festival promotion, then 5% for more than 50 loyalty points
    fn default() -> Self {
        Self {
            rules: vec![
                DiscountRule::festival(Decimal::new(10, 2)),
                DiscountRule::loyalty(Decimal::new(5, 2), DEFAULT_LOYALTY_THRESHOLD),
            ],
        }
    }
}

/// Maps the calendar onto active promotion names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionCalendar {
    pub festival_month: u32,
}

impl PromotionCalendar {
    pub fn new(festival_month: u32) -> Result<Self> {
        if !(1..=12).contains(&festival_month) {
            return Err(BargainError::InvalidMonth(festival_month));
        }
        Ok(Self { festival_month })
    }

    /// Promotions running in `month` (1-12)
    pub fn active_promotions(&self, month: u32) -> HashSet<String> {
        let mut active = HashSet::new();
        if month == self.festival_month {
            active.insert(FESTIVAL_RULE.to_string());
        }
        active
    }
}

impl Default for PromotionCalendar {
    fn default() -> Self {
        Self {
            festival_month: DEFAULT_FESTIVAL_MONTH,
        }
    }
}
