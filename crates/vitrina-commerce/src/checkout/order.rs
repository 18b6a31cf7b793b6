use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartSummary};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;

use super::form::{CheckoutForm, PaymentMethod};

/// Lifecycle of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Awaiting confirmation",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// An order can be cancelled until it leaves the warehouse.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// One purchased line, denormalized from the cart at placement time so
/// the order survives later catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// A placed order with its priced-out figures frozen in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub shipping: Money,
    pub total: Money,
    pub discount_code: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: i64,
}

impl Order {
    /// Builds an order from a non-empty cart, its computed summary,
    /// and a validated checkout form.
    pub fn from_cart(
        cart: &Cart,
        summary: &CartSummary,
        form: &CheckoutForm,
        user_id: Option<UserId>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::Validation(
                "cannot place an order from an empty cart".to_string(),
            ));
        }
        form.validate()?;

        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            lines.push(OrderLine {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                price: line.product.price,
                quantity: line.quantity,
                subtotal: line.subtotal()?,
            });
        }

        Ok(Self {
            id: OrderId::generate(),
            user_id,
            lines,
            subtotal: summary.subtotal,
            discount: summary.discount,
            shipping: summary.shipping,
            total: summary.total,
            discount_code: summary.discount_code.clone(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
            payment_method: form.payment_method,
            status: OrderStatus::Pending,
            created_at: current_timestamp(),
        })
    }

    /// Moves the order to `status`. Transitions out of a terminal
    /// state are rejected.
    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), CommerceError> {
        if self.status.is_terminal() {
            return Err(CommerceError::Validation(format!(
                "order is already {}",
                self.status.as_str()
            )));
        }
        self.status = status;
        Ok(())
    }

    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
