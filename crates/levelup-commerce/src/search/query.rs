//! Catalog query builder.

use crate::catalog::Product;
use crate::money::Clp;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortOption {
    /// Key used in query strings and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevancia",
            SortOption::PriceAsc => "precio_asc",
            SortOption::PriceDesc => "precio_desc",
            SortOption::NameAsc => "nombre_asc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
        }
    }

    fn sort(&self, products: &mut [&Product]) {
        // sort_by is stable, so ties keep catalog order
        match self {
            SortOption::Relevance => {}
            SortOption::PriceAsc => products.sort_by_key(|p| p.price),
            SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::NameAsc => {
                products.sort_by_cached_key(|p| p.name.to_lowercase());
            }
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "relevancia" | "relevance" => Ok(SortOption::Relevance),
            "precio_asc" | "price_asc" => Ok(SortOption::PriceAsc),
            "precio_desc" | "price_desc" => Ok(SortOption::PriceDesc),
            "nombre_asc" | "name_asc" => Ok(SortOption::NameAsc),
            other => Err(format!("unknown sort option: {other}")),
        }
    }
}

/// A catalog query: optional category, text and price cap plus a sort order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Category name; `None` or `"all"` means every category.
    pub category: Option<String>,
    /// Text to search for.
    pub text: Option<String>,
    /// Price cap, inclusive.
    pub max_price: Option<Clp>,
    /// Extra filters.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create an empty query matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let category = category.trim();
        self.category = if category.is_empty() || category.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(category.to_string())
        };
        self
    }

    /// Set the text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let text = text.trim();
        self.text = (!text.is_empty()).then(|| text.to_string());
        self
    }

    /// Set the price cap.
    pub fn with_max_price(mut self, max: Clp) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// All filters this query applies.
    pub fn all_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::with_capacity(self.filters.len() + 3);
        if let Some(category) = &self.category {
            filters.push(Filter::category(category.clone()));
        }
        if let Some(max) = self.max_price {
            filters.push(Filter::max_price(max));
        }
        if let Some(text) = &self.text {
            filters.push(Filter::text(text.clone()));
        }
        filters.extend(self.filters.iter().cloned());
        filters
    }

    /// Filter and sort a product list.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let filters = self.all_filters();
        let mut matched: Vec<&Product> = products
            .iter()
            .filter(|p| filters.iter().all(|f| f.matches(p)))
            .collect();
        self.sort.sort(&mut matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn codes(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.code.to_string()).collect()
    }

    #[test]
    fn test_empty_query_returns_catalog_order() {
        let catalog = Catalog::builtin();
        let results = catalog.search(&CatalogQuery::new());
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].code, "JM001");
        assert_eq!(results[9].code, "PP001");
    }

    #[test]
    fn test_all_category_means_no_filter() {
        let query = CatalogQuery::new().with_category("all");
        assert_eq!(query.category, None);
        let query = CatalogQuery::new().with_category("consolas");
        assert_eq!(codes(&Catalog::builtin().search(&query)), vec!["CO001"]);
    }

    #[test]
    fn test_price_sort_and_cap() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery::new()
            .with_max_price(Clp::new(30_000))
            .with_sort(SortOption::PriceAsc);
        assert_eq!(codes(&catalog.search(&query)), vec!["PP001", "JM002", "JM001", "MP001"]);

        let query = CatalogQuery::new().with_sort(SortOption::PriceDesc);
        assert_eq!(catalog.search(&query)[0].code, "CG001");
    }

    #[test]
    fn test_name_sort() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery::new()
            .with_category("Juegos de Mesa")
            .with_sort(SortOption::NameAsc);
        assert_eq!(codes(&catalog.search(&query)), vec!["JM002", "JM001"]);
    }

    #[test]
    fn test_text_search() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery::new().with_text("  gamer ");
        let results = catalog.search(&query);
        assert!(results.iter().all(|p| p.matches_text("gamer")));
        assert!(results.iter().any(|p| p.code == "MS001"));

        assert!(catalog.search(&CatalogQuery::new().with_text("zzz")).is_empty());
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("precio_asc".parse::<SortOption>(), Ok(SortOption::PriceAsc));
        assert_eq!("".parse::<SortOption>(), Ok(SortOption::Relevance));
        assert!("newest".parse::<SortOption>().is_err());
        assert_eq!(SortOption::NameAsc.as_str(), "nombre_asc");
    }
}
