//! The catalog filter engine.
//!
//! Filtering is conjunctive: a product must pass every active criterion.
//! Faceted counts re-run the full predicate with exactly one dimension
//! unconstrained, which is what the per-option counters in the filter
//! sidebar display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{AttributeKey, Category, Product};
use crate::money::{Currency, Money};

/// Sort order for filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Name A-Z, case-insensitive. The default.
    #[default]
    NameAsc,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SortKey::NameAsc),
            "price-asc" => Some(SortKey::PriceAsc),
            "price-desc" => Some(SortKey::PriceDesc),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name: A-Z",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
        }
    }
}

/// A facet dimension whose per-value counts can be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetDimension {
    /// The brand multi-select.
    Brand,
    /// One of the category-specific attribute selects.
    Attribute(AttributeKey),
}

/// A single candidate value within a facet, with its match count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The candidate value.
    pub value: String,
    /// Products that would match if this value were chosen.
    pub count: usize,
    /// Whether the value is part of the active criteria.
    pub selected: bool,
}

/// Filter criteria for the catalog.
///
/// Every field is optional; the empty criteria record matches all
/// products. Attribute filters use the fixed [`AttributeKey`] dimensions
/// so the matching function is exhaustively checkable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    /// Free-text search term.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<Category>,
    /// Brand multi-select; empty means unconstrained.
    pub brands: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
    /// Only products with stock > 0.
    pub in_stock_only: bool,
    /// Category-specific attribute equality filters.
    pub attributes: BTreeMap<AttributeKey, String>,
    /// Sort order applied after filtering.
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search term. An empty term is ignored.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        if !term.trim().is_empty() {
            self.search = Some(term);
        }
        self
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Add a brand to the brand set.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.push(brand.into());
        self
    }

    /// Set the price range. Absent bounds are unconstrained.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Only match in-stock products.
    pub fn in_stock(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Add a category-specific attribute equality filter.
    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value.into());
        self
    }

    /// Set the sort order.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Number of active filter dimensions (for the "N filters" badge).
    pub fn active_count(&self) -> usize {
        let mut count = self.attributes.len();
        if self.search.is_some() {
            count += 1;
        }
        if self.category.is_some() {
            count += 1;
        }
        if !self.brands.is_empty() {
            count += 1;
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            count += 1;
        }
        if self.in_stock_only {
            count += 1;
        }
        count
    }

    /// Check whether a product passes every active criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            if !text_matches(term, product) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if product.category != Some(category) {
                return false;
            }
        }

        if !self.brands.is_empty() {
            match &product.brand {
                Some(brand) if self.brands.iter().any(|b| b == brand) => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_price {
            if product.price.amount_minor < min.amount_minor {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price.amount_minor > max.amount_minor {
                return false;
            }
        }

        if self.in_stock_only && !product.is_in_stock() {
            return false;
        }

        for (key, wanted) in &self.attributes {
            match product.attribute(*key) {
                Some(value) if value.to_lowercase() == wanted.to_lowercase() => {}
                _ => return false,
            }
        }

        true
    }

    /// Filter a product list, then stable-sort by the criteria's sort
    /// key.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            SortKey::NameAsc => {
                matched.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            SortKey::PriceAsc => {
                matched.sort_by_key(|p| p.price.amount_minor);
            }
            SortKey::PriceDesc => {
                matched.sort_by_key(|p| std::cmp::Reverse(p.price.amount_minor));
            }
        }
        matched
    }

    /// A copy of these criteria with one facet dimension unconstrained.
    pub fn without_dimension(&self, dimension: FacetDimension) -> Self {
        let mut relaxed = self.clone();
        match dimension {
            FacetDimension::Brand => relaxed.brands.clear(),
            FacetDimension::Attribute(key) => {
                relaxed.attributes.remove(&key);
            }
        }
        relaxed
    }

    /// Per-value counts for one facet dimension.
    ///
    /// Each distinct value the products carry for the dimension is
    /// counted against the criteria with that dimension removed; values
    /// that would yield zero results are omitted so the UI can suppress
    /// them.
    pub fn facet_counts(&self, products: &[Product], dimension: FacetDimension) -> Vec<FacetValue> {
        let relaxed = self.without_dimension(dimension);

        let mut values: Vec<String> = products
            .iter()
            .filter_map(|p| dimension_value(p, dimension).map(str::to_string))
            .collect();
        values.sort();
        values.dedup();

        values
            .into_iter()
            .filter_map(|value| {
                let count = products
                    .iter()
                    .filter(|p| {
                        relaxed.matches(p) && dimension_value(p, dimension) == Some(value.as_str())
                    })
                    .count();
                if count == 0 {
                    return None;
                }
                let selected = match dimension {
                    FacetDimension::Brand => self.brands.contains(&value),
                    FacetDimension::Attribute(key) => self
                        .attributes
                        .get(&key)
                        .map(|v| v.to_lowercase() == value.to_lowercase())
                        .unwrap_or(false),
                };
                Some(FacetValue {
                    value,
                    count,
                    selected,
                })
            })
            .collect()
    }
}

/// Case-insensitive substring match against name, description, category
/// and brand; any one hit passes.
fn text_matches(term: &str, product: &Product) -> bool {
    let term = term.to_lowercase();
    if product.name.to_lowercase().contains(&term) {
        return true;
    }
    if product.description.to_lowercase().contains(&term) {
        return true;
    }
    if let Some(category) = product.category {
        if category.display_name().to_lowercase().contains(&term) {
            return true;
        }
    }
    if let Some(brand) = &product.brand {
        if brand.to_lowercase().contains(&term) {
            return true;
        }
    }
    false
}

fn dimension_value(product: &Product, dimension: FacetDimension) -> Option<&str> {
    match dimension {
        FacetDimension::Brand => product.brand.as_deref(),
        FacetDimension::Attribute(key) => product.attribute(key),
    }
}

/// Derived bounds for the price range inputs.
///
/// Only products with a positive price contribute; when none qualify the
/// bounds collapse to `(0, 0)`.
pub fn price_bounds(products: &[Product]) -> (Money, Money) {
    let mut priced = products.iter().filter(|p| p.price.is_positive());
    let first = match priced.next() {
        Some(p) => p.price,
        None => {
            let zero = Money::zero(Currency::default());
            return (zero, zero);
        }
    };
    let (min, max) = priced.fold((first, first), |(min, max), p| {
        (
            if p.price.amount_minor < min.amount_minor {
                p.price
            } else {
                min
            },
            if p.price.amount_minor > max.amount_minor {
                p.price
            } else {
                max
            },
        )
    });
    (min, max)
}

/// Same-category recommendations for a product page, excluding the
/// product itself.
pub fn related_products<'a>(
    products: &'a [Product],
    current: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let category = match current.category {
        Some(c) => c,
        None => return Vec::new(),
    };
    products
        .iter()
        .filter(|p| p.category == Some(category) && p.id != current.id)
        .take(limit)
        .collect()
}
