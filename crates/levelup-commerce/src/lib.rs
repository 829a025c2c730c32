//! Storefront domain types and rules for Level-Up Gamer.
//!
//! - **Catalog**: the fixed product list, reviews
//! - **Search**: linear filters and sorting over the catalog
//! - **Cart**: stock-aware cart lines, pricing, affiliate discount
//! - **Checkout**: cart to order reconciliation
//! - **Loyalty**: points and tiers derived from order history
//! - **Community**: sales fund and event calendar
//!
//! # Example
//!
//! ```rust
//! use levelup_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let mut cart = Cart::new();
//! cart.add(catalog.by_code("JM001").unwrap(), 2).unwrap();
//!
//! let pricing = CartPricing::compute(
//!     &cart,
//!     &catalog,
//!     &AffiliateDiscount::default(),
//!     Some("ana@duoc.cl"),
//! )
//! .unwrap();
//! assert_eq!(pricing.total, Clp::new(47_984));
//! ```

pub mod calendar;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod community;
pub mod loyalty;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Clp;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::calendar::{age_on, Clock, FixedClock, SystemClock};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Clp;

    // Catalog
    pub use crate::catalog::{Catalog, Product, Review};

    // Cart
    pub use crate::cart::{AffiliateDiscount, Cart, CartLine, CartPricing, QuantityUpdate};

    // Checkout
    pub use crate::checkout::{CheckoutRules, CustomerSnapshot, Order, OrderLineItem, Purchaser};

    // Loyalty and community
    pub use crate::community::{CommunityEvent, CommunityReport};
    pub use crate::loyalty::{PointsBreakdown, Tier};

    // Search
    pub use crate::search::{CatalogQuery, Filter, SortOption};
}
