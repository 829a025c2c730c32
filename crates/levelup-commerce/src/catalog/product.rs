//! Product type.

use crate::ids::ProductCode;
use crate::money::Clp;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product code.
    pub code: ProductCode,
    /// Category display name.
    pub category: String,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Clp,
    /// Units available.
    pub stock: i64,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Local distributor name.
    pub distributor: String,
    /// Long description.
    pub description: String,
    /// Bullet-point highlights.
    pub highlights: Vec<String>,
}

impl Product {
    /// Create a product with the essential fields; the rest start empty.
    pub fn new(
        code: impl Into<ProductCode>,
        category: impl Into<String>,
        name: impl Into<String>,
        price: Clp,
        stock: i64,
    ) -> Self {
        Self {
            code: code.into(),
            category: category.into(),
            name: name.into(),
            price,
            stock,
            rating: 0.0,
            manufacturer: String::new(),
            distributor: String::new(),
            description: String::new(),
            highlights: Vec::new(),
        }
    }

    /// Check if any units are available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if `quantity` units can be supplied.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }

    /// Relative path of the product image.
    pub fn image_path(&self) -> String {
        format!("assets/images/{}.webp", self.code)
    }

    /// Case-insensitive substring match over name, description and code.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.code.as_str().to_lowercase().contains(&needle)
    }

    /// Star rating rounded to the nearest whole star, e.g. `★★★★★`.
    pub fn stars(&self) -> String {
        let filled = self.rating.round().clamp(0.0, 5.0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}
