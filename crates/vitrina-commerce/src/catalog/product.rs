//! Product and category types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Laptops,
    Phones,
    Headsets,
    SystemUnits,
    Monitors,
    Accessories,
    MemoryCards,
}

impl Category {
    /// All known categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Laptops,
        Category::Phones,
        Category::Headsets,
        Category::SystemUnits,
        Category::Monitors,
        Category::Accessories,
        Category::MemoryCards,
    ];

    /// URL-friendly slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Laptops => "laptops",
            Category::Phones => "phones",
            Category::Headsets => "headsets",
            Category::SystemUnits => "system-units",
            Category::Monitors => "monitors",
            Category::Accessories => "accessories",
            Category::MemoryCards => "memory-cards",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Laptops => "Laptops",
            Category::Phones => "Phones",
            Category::Headsets => "Headsets",
            Category::SystemUnits => "System Units",
            Category::Monitors => "Monitors",
            Category::Accessories => "Accessories",
            Category::MemoryCards => "Memory Cards",
        }
    }

    /// Parse a slug or display name, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered || c.display_name().to_lowercase() == lowered)
    }

    /// The attribute dimensions that make sense as filters for this
    /// category.
    pub fn attribute_keys(&self) -> &'static [AttributeKey] {
        match self {
            Category::Laptops | Category::SystemUnits => &[
                AttributeKey::Memory,
                AttributeKey::Storage,
                AttributeKey::Processor,
                AttributeKey::Cores,
            ],
            Category::Phones => &[
                AttributeKey::Storage,
                AttributeKey::Memory,
                AttributeKey::Color,
            ],
            Category::Headsets | Category::Accessories => &[AttributeKey::Color],
            Category::Monitors => &[AttributeKey::ScreenSize, AttributeKey::Resolution],
            Category::MemoryCards => &[
                AttributeKey::SpeedClass,
                AttributeKey::FormFactor,
                AttributeKey::Storage,
            ],
        }
    }
}

/// The fixed set of category-specific attribute dimensions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AttributeKey {
    Memory,
    Storage,
    Processor,
    Cores,
    Color,
    ScreenSize,
    Resolution,
    SpeedClass,
    FormFactor,
}

impl AttributeKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Memory => "memory",
            AttributeKey::Storage => "storage",
            AttributeKey::Processor => "processor",
            AttributeKey::Cores => "cores",
            AttributeKey::Color => "color",
            AttributeKey::ScreenSize => "screen_size",
            AttributeKey::Resolution => "resolution",
            AttributeKey::SpeedClass => "speed_class",
            AttributeKey::FormFactor => "form_factor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AttributeKey::Memory => "Memory",
            AttributeKey::Storage => "Storage",
            AttributeKey::Processor => "Processor",
            AttributeKey::Cores => "Cores",
            AttributeKey::Color => "Color",
            AttributeKey::ScreenSize => "Screen Size",
            AttributeKey::Resolution => "Resolution",
            AttributeKey::SpeedClass => "Speed Class",
            AttributeKey::FormFactor => "Form Factor",
        }
    }
}

/// A product in the catalog.
///
/// Owned by the external data store; everywhere outside the admin data
/// access layer this is a read-only snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Price at the time the snapshot was taken.
    pub price: Money,
    /// Full description.
    pub description: String,
    /// Category, if the product has a recognized one.
    pub category: Option<Category>,
    /// Units in stock.
    pub stock: i64,
    /// Primary image URL.
    pub image: Option<String>,
    /// Additional image URLs.
    pub images: Vec<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// Category-specific attributes.
    pub attributes: BTreeMap<AttributeKey, String>,
    /// Average review rating.
    pub rating: Option<f64>,
    /// Number of reviews.
    pub review_count: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Product {
    /// Create a new product with a generated id.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            price,
            description: String::new(),
            category: None,
            stock: 0,
            image: None,
            images: Vec::new(),
            brand: None,
            attributes: BTreeMap::new(),
            rating: None,
            review_count: None,
            created_at: current_timestamp(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set a category-specific attribute.
    pub fn with_attribute(mut self, key: AttributeKey, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value.into());
        self
    }

    /// Get a category-specific attribute value.
    pub fn attribute(&self, key: AttributeKey) -> Option<&str> {
        self.attributes.get(&key).map(String::as_str)
    }

    /// Check if the product has stock available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
