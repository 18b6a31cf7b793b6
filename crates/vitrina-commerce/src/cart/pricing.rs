use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

use super::cart::Cart;
use super::discount::Discount;

/// Orders strictly above this subtotal ship for free.
pub const FREE_SHIPPING_THRESHOLD_MINOR: i64 = 5000;

/// Flat shipping fee below the free-shipping threshold.
pub const SHIPPING_FEE_MINOR: i64 = 300;

/// The priced-out totals of a cart, ready to display or to stamp onto
/// an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub shipping: Money,
    pub total: Money,
    pub item_count: i64,
    pub discount_code: Option<String>,
}

impl CartSummary {
    /// Prices out `cart`, optionally applying a validated discount.
    ///
    /// Shipping is decided on the pre-discount subtotal, so a discount
    /// never pushes an order back under the free-shipping threshold.
    /// The total never goes negative: the discounted subtotal floors
    /// at zero before shipping is added.
    pub fn compute(cart: &Cart, discount: Option<&Discount>) -> Result<Self, CommerceError> {
        let subtotal = cart.subtotal()?;
        let currency = subtotal.currency;

        if cart.is_empty() {
            return Ok(Self {
                subtotal,
                discount: Money::zero(currency),
                shipping: Money::zero(currency),
                total: Money::zero(currency),
                item_count: 0,
                discount_code: None,
            });
        }

        let deduction = discount
            .map(|d| d.deduction(subtotal))
            .unwrap_or(Money::zero(currency));

        let shipping = if subtotal.amount_minor > FREE_SHIPPING_THRESHOLD_MINOR {
            Money::zero(currency)
        } else {
            Money::new(SHIPPING_FEE_MINOR, currency)
        };

        let total = subtotal.saturating_sub(deduction)?.try_add(shipping)?;

        Ok(Self {
            subtotal,
            discount: deduction,
            shipping,
            total,
            item_count: cart.total_items(),
            discount_code: discount.map(|d| d.code.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::DiscountValue;
    use crate::catalog::Product;

    fn cart_with(prices: &[(i64, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (i, (price, qty)) in prices.iter().enumerate() {
            let p = Product::new(format!("Item {i}"), Money::rub(*price));
            let id = p.id.clone();
            cart.add(p);
            cart.set_quantity(&id, *qty);
        }
        cart
    }

    #[test]
    fn test_shipping_charged_at_or_below_threshold() {
        let cart = cart_with(&[(1000, 2), (500, 1)]);
        let summary = CartSummary::compute(&cart, None).unwrap();
        assert_eq!(summary.subtotal, Money::rub(2500));
        assert_eq!(summary.shipping, Money::rub(300));
        assert_eq!(summary.total, Money::rub(2800));
    }

    #[test]
    fn test_threshold_itself_still_pays_shipping() {
        let cart = cart_with(&[(5000, 1)]);
        let summary = CartSummary::compute(&cart, None).unwrap();
        assert_eq!(summary.shipping, Money::rub(300));
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let cart = cart_with(&[(6000, 1)]);
        let summary = CartSummary::compute(&cart, None).unwrap();
        assert_eq!(summary.shipping, Money::rub(0));
        assert_eq!(summary.total, Money::rub(6000));
    }

    #[test]
    fn test_percentage_discount_applies_before_shipping() {
        let cart = cart_with(&[(1000, 2), (500, 1)]);
        let discount = Discount::new("WELCOME10", DiscountValue::Percentage(10.0));
        let summary = CartSummary::compute(&cart, Some(&discount)).unwrap();
        assert_eq!(summary.discount, Money::rub(250));
        assert_eq!(summary.total, Money::rub(2550));
    }

    #[test]
    fn test_shipping_decided_on_pre_discount_subtotal() {
        let cart = cart_with(&[(6000, 1)]);
        let discount = Discount::new("BIG", DiscountValue::Fixed(Money::rub(2000)));
        let summary = CartSummary::compute(&cart, Some(&discount)).unwrap();
        assert_eq!(summary.shipping, Money::rub(0));
        assert_eq!(summary.total, Money::rub(4000));
    }

    #[test]
    fn test_total_never_goes_negative() {
        let cart = cart_with(&[(100, 1)]);
        let discount = Discount::new("HUGE", DiscountValue::Fixed(Money::rub(10_000)));
        let summary = CartSummary::compute(&cart, Some(&discount)).unwrap();
        assert_eq!(summary.total, Money::rub(300));
    }

    #[test]
    fn test_empty_cart_summary_is_all_zero() {
        let summary = CartSummary::compute(&Cart::new(), None).unwrap();
        assert!(summary.total.is_zero());
        assert!(summary.shipping.is_zero());
        assert_eq!(summary.item_count, 0);
    }
}
