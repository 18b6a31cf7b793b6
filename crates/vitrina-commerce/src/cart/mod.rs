//! Shopping cart module.
//!
//! Contains the cart and its persisted ledger, discount evaluation, and
//! order pricing.

mod cart;
mod discount;
mod ledger;
mod pricing;

pub use cart::{Cart, CartLine};
pub use discount::{Discount, DiscountBook, DiscountValue};
pub use ledger::{CartLedger, CART_STORAGE_KEY};
pub use pricing::{CartSummary, FREE_SHIPPING_THRESHOLD_MINOR, SHIPPING_FEE_MINOR};
