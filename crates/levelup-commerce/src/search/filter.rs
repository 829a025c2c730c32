//! Catalog filter types.

use crate::catalog::Product;
use crate::money::Clp;
use serde::{Deserialize, Serialize};

/// A single catalog filter. A query keeps products matching all of its filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Category name, compared case-insensitively.
    Category(String),
    /// Unit price at most this amount.
    MaxPrice(Clp),
    /// Case-insensitive substring over name, description and code.
    Text(String),
    /// Only products with stock left.
    InStock,
}

impl Filter {
    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a max price filter.
    pub fn max_price(max: Clp) -> Self {
        Filter::MaxPrice(max)
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check a product against this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(name) => product.category.eq_ignore_ascii_case(name),
            Filter::MaxPrice(max) => product.price <= *max,
            Filter::Text(query) => product.matches_text(query),
            Filter::InStock => product.in_stock(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> Product {
        Product::new("MS001", "Mouse", "Mouse Gamer Logitech G502 HERO", Clp::new(49_990), 25)
    }

    #[test]
    fn test_category_filter_ignores_case() {
        assert!(Filter::category("mouse").matches(&mouse()));
        assert!(!Filter::category("Mousepad").matches(&mouse()));
    }

    #[test]
    fn test_price_filter_is_inclusive() {
        assert!(Filter::max_price(Clp::new(49_990)).matches(&mouse()));
        assert!(!Filter::max_price(Clp::new(49_989)).matches(&mouse()));
    }

    #[test]
    fn test_text_and_stock_filters() {
        assert!(Filter::text("logitech").matches(&mouse()));
        assert!(Filter::InStock.matches(&mouse()));
        let sold_out = Product::new("X", "Mouse", "Viejo", Clp::new(1), 0);
        assert!(!Filter::InStock.matches(&sold_out));
    }
}
