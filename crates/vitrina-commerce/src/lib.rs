//! Storefront domain types and logic for Vitrina.
//!
//! This crate provides the client-side core of the storefront:
//!
//! - **Catalog**: products, fixed categories, the conjunctive filter
//!   engine with faceted counts
//! - **Cart**: the persisted cart ledger, discount evaluation, order
//!   pricing
//! - **Favorites**: the persisted liked-products ledger
//! - **Checkout**: form validation, order records and status transitions
//! - **Reviews**: rating/comment validation
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrina_commerce::prelude::*;
//! use vitrina_store::Store;
//!
//! let mut ledger = CartLedger::open(Store::in_memory());
//! ledger.add(product)?;
//!
//! let book = DiscountBook::with_default_codes();
//! let subtotal = ledger.cart().subtotal()?;
//! let discount = book.validate("WELCOME10", subtotal);
//!
//! let summary = CartSummary::compute(ledger.cart(), discount)?;
//! println!("Total: {}", summary.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod favorites;
pub mod review;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        AttributeKey, Category, FacetDimension, FacetValue, FilterCriteria, Product, SortKey,
    };

    // Cart
    pub use crate::cart::{
        Cart, CartLedger, CartLine, CartSummary, Discount, DiscountBook, DiscountValue,
    };

    // Favorites
    pub use crate::favorites::{FavoriteSet, FavoritesLedger};

    // Checkout
    pub use crate::checkout::{CheckoutForm, Order, OrderLine, OrderStatus, PaymentMethod};

    // Reviews
    pub use crate::review::Review;
}
