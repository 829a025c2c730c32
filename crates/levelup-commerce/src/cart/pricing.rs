//! Cart pricing calculations.
//!
//! Used both for the cart preview and for building orders, so the two can
//! never disagree.

use crate::cart::{AffiliateDiscount, Cart};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductCode;
use crate::money::Clp;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartPricing {
    /// Lines that resolved to a catalog product.
    pub line_items: Vec<LineItemPricing>,
    /// Sum of line subtotals.
    pub subtotal: Clp,
    /// Affiliate discount.
    pub discount: Clp,
    /// Subtotal minus discount.
    pub total: Clp,
    /// Whether the affiliate discount applied.
    pub affiliate: bool,
}

impl CartPricing {
    /// Price a cart against the catalog.
    ///
    /// Lines whose product no longer exists are skipped. Prices always come
    /// from the catalog, never from the line snapshot.
    pub fn compute(
        cart: &Cart,
        catalog: &Catalog,
        policy: &AffiliateDiscount,
        email: Option<&str>,
    ) -> Result<Self, CommerceError> {
        let mut line_items = Vec::with_capacity(cart.unique_item_count());
        let mut subtotal = Clp::zero();

        for line in cart.lines() {
            let Some(product) = catalog.by_code(line.code.as_str()) else {
                debug!(code = %line.code, "Dropping cart line for unknown product");
                continue;
            };
            let line_subtotal = product
                .price
                .checked_mul(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            subtotal = subtotal
                .checked_add(line_subtotal)
                .ok_or(CommerceError::Overflow)?;
            line_items.push(LineItemPricing {
                code: product.code.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity: line.quantity,
                subtotal: line_subtotal,
            });
        }

        let affiliate = email.is_some_and(|e| policy.is_affiliate(e));
        let discount = policy.discount(subtotal, affiliate)?;

        Ok(Self {
            line_items,
            subtotal,
            discount,
            total: subtotal - discount,
            affiliate,
        })
    }

    /// Check if any discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// Total units priced.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product code.
    pub code: ProductCode,
    /// Product name.
    pub name: String,
    /// Catalog unit price.
    pub unit_price: Clp,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub subtotal: Clp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;

    fn catan_cart(quantity: i64) -> Cart {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(catalog.by_code("JM001").unwrap(), quantity).unwrap();
        cart
    }

    #[test]
    fn test_non_affiliate_pricing() {
        let pricing = CartPricing::compute(
            &catan_cart(2),
            &Catalog::builtin(),
            &AffiliateDiscount::default(),
            Some("ana@gmail.com"),
        )
        .unwrap();
        assert_eq!(pricing.subtotal, Clp::new(59_980));
        assert_eq!(pricing.discount, Clp::zero());
        assert_eq!(pricing.total, Clp::new(59_980));
        assert!(!pricing.has_discount());
    }

    #[test]
    fn test_affiliate_pricing() {
        let pricing = CartPricing::compute(
            &catan_cart(2),
            &Catalog::builtin(),
            &AffiliateDiscount::default(),
            Some("ana@duoc.cl"),
        )
        .unwrap();
        assert_eq!(pricing.discount, Clp::new(11_996));
        assert_eq!(pricing.total, Clp::new(47_984));
        assert!(pricing.affiliate);
    }

    #[test]
    fn test_unknown_lines_are_skipped_and_snapshot_ignored() {
        let mut stale = CartLine::new(Catalog::builtin().by_code("JM001").unwrap(), 1);
        stale.price = Clp::new(1);
        let ghost = CartLine {
            code: "GONE1".into(),
            quantity: 2,
            price: Clp::new(10_000),
            name: "Retirado".into(),
            image: String::new(),
        };
        let cart = Cart::from_lines(vec![stale, ghost]);

        let pricing =
            CartPricing::compute(&cart, &Catalog::builtin(), &AffiliateDiscount::default(), None)
                .unwrap();
        assert_eq!(pricing.line_items.len(), 1);
        assert_eq!(pricing.subtotal, Clp::new(29_990));
        assert_eq!(pricing.item_count(), 1);
    }

    #[test]
    fn test_affiliate_discount_overflow_on_huge_cart() {
        let ps5 = Catalog::builtin().by_code("CO001").unwrap().clone();
        let cart = Cart::from_lines([CartLine::new(&ps5, 1_000_000_000_000)]);
        let catalog = Catalog::builtin();
        let policy = AffiliateDiscount::default();

        let err = CartPricing::compute(&cart, &catalog, &policy, Some("a@duoc.cl")).unwrap_err();
        assert_eq!(err.code(), "OVERFLOW");
        // the subtotal alone still fits
        let plain = CartPricing::compute(&cart, &catalog, &policy, Some("a@gmail.com")).unwrap();
        assert_eq!(plain.subtotal, Clp::new(549_990_000_000_000_000));
    }
}
