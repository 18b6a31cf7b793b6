//! Checkout: order form validation and order records.

mod form;
mod order;

pub use form::{CheckoutForm, PaymentMethod};
pub use order::{Order, OrderLine, OrderStatus};
