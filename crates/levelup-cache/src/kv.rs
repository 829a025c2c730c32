//! Key-value store boundary with automatic JSON serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// A synchronous string-keyed store holding JSON text values.
///
/// Mirrors the semantics of a browser origin's local storage: every read and
/// write is immediate, there are no transactions, and the last write wins.
pub trait KvStore {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a raw value under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), CacheError>;

    /// List every key currently stored.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
///
/// # Example
///
/// ```
/// use levelup_cache::{Cache, MemoryStore};
///
/// let mut cache = Cache::new(MemoryStore::new());
/// cache.set("levelup_last_order", &"LUG-20250101-AB12").unwrap();
/// let id: Option<String> = cache.get("levelup_last_order").unwrap();
/// assert_eq!(id.as_deref(), Some("LUG-20250101-AB12"));
/// ```
#[derive(Debug, Default)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text is not valid JSON for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => {
                let value: T = serde_json::from_str(&raw)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when the key is missing or
    /// the stored value cannot be read.
    ///
    /// Read failures are logged and never surfaced to the caller.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "key not present, using default");
                T::default()
            }
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable stored value");
                T::default()
            }
        }
    }

    /// Get the raw JSON text under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        debug!(key, bytes = raw.len(), "writing value");
        self.store.set(key, raw)
    }

    /// Delete a value from the cache.
    pub fn delete(&mut self, key: &str) -> Result<(), CacheError> {
        debug!(key, "deleting value");
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cache and return the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```
/// use levelup_cache::cache_key;
///
/// let key = cache_key!("levelup_reviews", "JM001");
/// assert_eq!(key, "levelup_reviews:JM001");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
