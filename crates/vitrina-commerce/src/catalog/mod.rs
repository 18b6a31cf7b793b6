//! Product catalog module.
//!
//! Contains product and category types plus the filter engine.

mod filter;
mod product;

pub use filter::{
    price_bounds, related_products, FacetDimension, FacetValue, FilterCriteria, SortKey,
};
pub use product::{AttributeKey, Category, Product};
