//! Type-safe key-value storage layer for the Level-Up storefront.
//!
//! Every persisted collection (users, cart, orders, ...) crosses this
//! boundary as JSON text under a string key.
//!
//! # Example
//!
//! ```
//! use levelup_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct CartLine {
//!     code: String,
//!     quantity: i64,
//! }
//!
//! let mut cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("levelup_cart", &vec![CartLine { code: "JM001".into(), quantity: 1 }]).unwrap();
//!
//! // Retrieve a value, treating unreadable data as empty
//! let cart: Vec<CartLine> = cache.get_or_default("levelup_cart");
//! assert_eq!(cart.len(), 1);
//!
//! // Delete a value
//! cache.delete("levelup_cart").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
