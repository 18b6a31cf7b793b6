use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// One cart entry: a snapshot of the product as it was when added,
/// plus the chosen quantity.
///
/// The embedded product is a snapshot. If the catalog price changes
/// later, lines already in the cart keep the price they were added at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(product: Product, quantity: i64) -> Self {
        Self { product, quantity }
    }

    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.product.price.try_mul(self.quantity)
    }
}

/// An in-memory shopping cart.
///
/// The cart itself is a plain value type. Persistence lives in
/// [`CartLedger`](super::CartLedger), which replays mutations through
/// this type on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.lines.iter().any(|line| &line.product.id == product_id)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.lines
            .iter()
            .find(|line| &line.product.id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Adds one unit of `product`. If the product is already in the
    /// cart its quantity is bumped by one; otherwise a new line with
    /// quantity 1 is appended, preserving insertion order.
    pub fn add(&mut self, product: Product) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine::new(product, 1)),
        }
    }

    /// Removes the line for `product_id`. No-op when the product is
    /// not in the cart.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product.id != product_id);
    }

    /// Sets the quantity for `product_id`. A quantity of zero or less
    /// removes the line. Setting a quantity for a product that is not
    /// in the cart is a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
        {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total unit count across all lines.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line subtotals. An empty cart totals zero in the
    /// default currency.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let currency = self
            .lines
            .first()
            .map(|line| line.product.price.currency)
            .unwrap_or(Currency::default());
        let mut total = Money::zero(currency);
        for line in &self.lines {
            total = total.try_add(line.subtotal()?)?;
        }
        Ok(total)
    }
}
