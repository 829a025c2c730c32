//! Product catalog module.
//!
//! The catalog is a fixed, in-memory product list. Lookups and filters are
//! linear scans; there are only a handful of products.

mod data;
mod product;
mod review;

pub use product::Product;
pub use review::{average_rating, Review};

use crate::money::Clp;
use crate::search::CatalogQuery;

/// Number of related products shown on a product page.
pub const RELATED_LIMIT: usize = 3;

/// An ordered, read-only list of products.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The shop's built-in product list.
    pub fn builtin() -> Self {
        Self::new(data::builtin_products())
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by exact code.
    pub fn by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Distinct category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.products.iter().map(|p| p.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Highest unit price in the catalog.
    pub fn max_price(&self) -> Clp {
        self.products
            .iter()
            .map(|p| p.price)
            .max()
            .unwrap_or_default()
    }

    /// Products in the same category as `code`, excluding it, in catalog order.
    pub fn related(&self, code: &str, limit: usize) -> Vec<&Product> {
        let Some(product) = self.by_code(code) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.code != product.code)
            .take(limit)
            .collect()
    }

    /// Run a filter/sort query.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        let ps5 = catalog.by_code("CO001").unwrap();
        assert_eq!(ps5.name, "PlayStation 5");
        assert_eq!(ps5.stock, 5);
        assert!(catalog.by_code("co001").is_none());
    }

    #[test]
    fn test_codes_unique() {
        let catalog = Catalog::builtin();
        let mut codes: Vec<_> = catalog.products().iter().map(|p| p.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), catalog.len());
    }

    #[test]
    fn test_categories_sorted_unique() {
        let catalog = Catalog::builtin();
        let categories = catalog.categories();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[0], "Accesorios");
        assert!(categories.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_max_price() {
        assert_eq!(Catalog::builtin().max_price(), Clp::new(1_299_990));
        assert_eq!(Catalog::new(Vec::new()).max_price(), Clp::zero());
    }

    #[test]
    fn test_related() {
        let catalog = Catalog::builtin();
        let related = catalog.related("JM001", RELATED_LIMIT);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].code, "JM002");

        assert!(catalog.related("CO001", RELATED_LIMIT).is_empty());
        assert!(catalog.related("NOPE", RELATED_LIMIT).is_empty());
    }
}
