use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::ids::DiscountId;
use crate::money::Money;

/// The deduction a discount grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountValue {
    /// Percentage of the order subtotal, e.g. `10.0` for 10%.
    Percentage(f64),
    /// Fixed amount, capped at the subtotal so the deduction never
    /// exceeds what is being paid.
    Fixed(Money),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: DiscountId,
    pub code: String,
    pub value: DiscountValue,
    pub min_order_amount: Option<Money>,
    pub max_uses: Option<i64>,
    pub used_count: i64,
    pub active: bool,
    pub valid_until: Option<i64>,
}

impl Discount {
    pub fn new(code: impl Into<String>, value: DiscountValue) -> Self {
        Self {
            id: DiscountId::generate(),
            code: code.into().trim().to_uppercase(),
            value,
            min_order_amount: None,
            max_uses: None,
            used_count: 0,
            active: true,
            valid_until: None,
        }
    }

    pub fn with_min_order(mut self, amount: Money) -> Self {
        self.min_order_amount = Some(amount);
        self
    }

    pub fn with_max_uses(mut self, max_uses: i64) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn with_valid_until(mut self, timestamp: i64) -> Self {
        self.valid_until = Some(timestamp);
        self
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.valid_until.is_some_and(|until| now > until)
    }

    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.used_count >= max)
    }

    pub fn meets_minimum(&self, subtotal: Money) -> bool {
        match self.min_order_amount {
            Some(min) => subtotal.amount_minor >= min.amount_minor,
            None => true,
        }
    }

    /// All applicability checks combined: the code must be active, not
    /// expired, not used up, and the order must meet the minimum.
    pub fn is_applicable(&self, subtotal: Money, now: i64) -> bool {
        self.active && !self.is_expired(now) && !self.is_exhausted() && self.meets_minimum(subtotal)
    }

    /// The amount deducted from `subtotal`.
    ///
    /// A percentage discount rounds to the nearest minor unit. A fixed
    /// discount is capped at the subtotal.
    pub fn deduction(&self, subtotal: Money) -> Money {
        match &self.value {
            DiscountValue::Percentage(pct) => subtotal.percentage(*pct),
            DiscountValue::Fixed(amount) => Money::min(*amount, subtotal),
        }
    }
}

/// The set of known discount codes, indexed by normalized code.
#[derive(Debug, Clone, Default)]
pub struct DiscountBook {
    discounts: Vec<Discount>,
}

impl DiscountBook {
    /// Message shown when a code fails any applicability check. The
    /// caller is deliberately not told which check failed.
    pub const REJECTION_MESSAGE: &'static str = "Promo code is invalid or expired";

    pub fn new() -> Self {
        Self::default()
    }

    /// A book seeded with the stock promotional codes.
    pub fn with_default_codes() -> Self {
        let mut summer = Discount::new("SUMMER2024", DiscountValue::Fixed(Money::rub(500)))
            .with_min_order(Money::rub(3000))
            .with_max_uses(100);
        summer.used_count = 5;

        Self {
            discounts: vec![
                Discount::new("WELCOME10", DiscountValue::Percentage(10.0))
                    .with_min_order(Money::rub(1000)),
                summer,
            ],
        }
    }

    pub fn insert(&mut self, discount: Discount) {
        self.discounts.push(discount);
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Discount> {
        let normalized = code.trim().to_uppercase();
        self.discounts.iter().find(|d| d.code == normalized)
    }

    /// Looks up `code` (case-insensitively, ignoring surrounding
    /// whitespace) and checks it against `subtotal`. Returns the
    /// discount only when every applicability check passes.
    pub fn validate(&self, code: &str, subtotal: Money) -> Option<&Discount> {
        let now = current_timestamp();
        self.find_by_code(code)
            .filter(|d| d.is_applicable(subtotal, now))
    }

    /// Records one use of `code`. Once a capped code reaches its
    /// maximum, [`validate`](Self::validate) starts rejecting it.
    pub fn mark_used(&mut self, code: &str) {
        let normalized = code.trim().to_uppercase();
        if let Some(discount) = self.discounts.iter_mut().find(|d| d.code == normalized) {
            discount.used_count += 1;
            tracing::debug!(code = %discount.code, used = discount.used_count, "discount redeemed");
        }
    }
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
