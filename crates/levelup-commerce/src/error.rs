//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog, cart and checkout operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product has no stock at all.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// Requested quantity would exceed available stock.
    #[error("Only {stock} units of {code} available and {in_cart} already in the cart (requested {requested})")]
    QuantityExceedsStock {
        code: String,
        requested: i64,
        in_cart: i64,
        stock: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Checkout attempted without a current user.
    #[error("No user is signed in")]
    NoUser,

    /// Checkout attempted by a user below the minimum age.
    #[error("Purchases are limited to adults (age {age:?} below {minimum})")]
    Underage { age: Option<u32>, minimum: u32 },

    /// Checkout attempted with an empty cart.
    #[error("The cart is empty")]
    EmptyCart,

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Review rejected by validation.
    #[error("Invalid review: {0}")]
    InvalidReview(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    /// Stable code for this error, as reported to the caller's UI.
    pub fn code(&self) -> &'static str {
        match self {
            CommerceError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            CommerceError::OutOfStock(_) => "OUT_OF_STOCK",
            CommerceError::QuantityExceedsStock { .. } => "QUANTITY_EXCEEDS_STOCK",
            CommerceError::InvalidQuantity(_) => "INVALID_QUANTITY",
            CommerceError::NoUser => "NO_USER",
            CommerceError::Underage { .. } => "UNDERAGE",
            CommerceError::EmptyCart => "EMPTY",
            CommerceError::OrderNotFound(_) => "ORDER_NOT_FOUND",
            CommerceError::InvalidReview(_) => "INVALID_REVIEW",
            CommerceError::Overflow => "OVERFLOW",
        }
    }

    /// Check if this error is one of the checkout preconditions.
    pub fn is_checkout_precondition(&self) -> bool {
        matches!(
            self,
            CommerceError::NoUser | CommerceError::Underage { .. } | CommerceError::EmptyCart
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CommerceError::NoUser.code(), "NO_USER");
        assert_eq!(CommerceError::EmptyCart.code(), "EMPTY");
        assert_eq!(
            CommerceError::Underage {
                age: Some(17),
                minimum: 18
            }
            .code(),
            "UNDERAGE"
        );
        assert_eq!(
            CommerceError::OutOfStock("CO001".into()).code(),
            "OUT_OF_STOCK"
        );
    }

    #[test]
    fn test_checkout_precondition() {
        assert!(CommerceError::EmptyCart.is_checkout_precondition());
        assert!(!CommerceError::ProductNotFound("x".into()).is_checkout_precondition());
    }
}
