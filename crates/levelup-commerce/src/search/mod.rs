//! Search module.
//!
//! Linear filters and sorting over the catalog.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{CatalogQuery, SortOption};
