//! The Level-Up Gamer storefront over a local key-value store.
//!
//! [`Storefront`] owns the store and exposes one method per page action:
//! browsing, cart edits, accounts, checkout, receipts, reviews and the
//! community page. Older stores are migrated to the current layout when
//! opened.
//!
//! # Example
//!
//! ```rust
//! use levelup_cache::MemoryStore;
//! use levelup_storefront::prelude::*;
//!
//! let mut shop = Storefront::open(MemoryStore::new(), StoreRules::default()).unwrap();
//! shop.add_to_cart("JM001", 2).unwrap();
//!
//! let summary = shop.cart_summary().unwrap();
//! assert_eq!(summary.total.amount(), 59_980);
//!
//! // nobody is signed in
//! assert_eq!(shop.checkout().unwrap_err().code(), "NO_USER");
//! ```

mod config;
mod error;
mod events;
pub mod keys;
pub mod migration;
mod query;
mod storefront;
pub mod views;

pub use config::StoreRules;
pub use error::{Result, StorefrontError};
pub use events::{StoreEvent, Subscriber, Subscribers};
pub use migration::{MigrationReport, SCHEMA_VERSION};
pub use query::PageQuery;
pub use storefront::{ProfileStats, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        MigrationReport, PageQuery, ProfileStats, StoreEvent, StoreRules, Storefront,
        StorefrontError,
    };
    pub use levelup_auth::{ProfileUpdate, RegistrationForm, User};
    pub use levelup_commerce::prelude::*;
}
