//! Storefront error type.

use levelup_auth::AuthError;
use levelup_cache::CacheError;
use levelup_commerce::CommerceError;
use thiserror::Error;

/// Any failure a storefront operation can report.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Catalog, cart or checkout rule violated.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Registration, login or profile rule violated.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Writing to the store failed.
    #[error("storage error: {0}")]
    Storage(#[from] CacheError),
}

impl StorefrontError {
    /// Stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            StorefrontError::Commerce(e) => e.code(),
            StorefrontError::Auth(e) => e.code(),
            StorefrontError::Storage(_) => "STORAGE",
        }
    }
}

/// Result alias for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_pass_through() {
        let err: StorefrontError = CommerceError::EmptyCart.into();
        assert_eq!(err.code(), "EMPTY");
        let err: StorefrontError = AuthError::InvalidCredentials.into();
        assert_eq!(err.code(), "INVALID_CREDENTIALS");
        let err: StorefrontError = CacheError::StoreError("disk full".into()).into();
        assert_eq!(err.code(), "STORAGE");
        assert!(err.to_string().contains("disk full"));
    }
}
