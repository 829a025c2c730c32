//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductCode;
use crate::money::Clp;
use serde::{Deserialize, Serialize};

/// One product in the cart.
///
/// Name, price and image are snapshots taken when the line was last added
/// to; checkout always re-prices from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product code.
    pub code: ProductCode,
    /// Units, at least 1.
    #[serde(alias = "qty", alias = "cantidad")]
    pub quantity: i64,
    /// Unit price snapshot.
    #[serde(default, alias = "precio")]
    pub price: Clp,
    /// Product name snapshot.
    #[serde(default, alias = "nombre")]
    pub name: String,
    /// Image path.
    #[serde(default)]
    pub image: String,
}

impl CartLine {
    /// Create a line for `quantity` units of `product`.
    pub fn new(product: &Product, quantity: i64) -> Self {
        Self {
            code: product.code.clone(),
            quantity,
            price: product.price,
            name: product.name.clone(),
            image: product.image_path(),
        }
    }
}

/// Result of setting a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// Quantity set as requested.
    Updated { quantity: i64 },
    /// Requested quantity was out of range and clamped.
    Clamped { requested: i64, applied: i64 },
    /// Quantity below 1 removed the line.
    Removed,
    /// No line for that product.
    NotInCart,
}

impl QuantityUpdate {
    /// Quantity now in the cart for the product.
    pub fn applied(&self) -> i64 {
        match self {
            QuantityUpdate::Updated { quantity } => *quantity,
            QuantityUpdate::Clamped { applied, .. } => *applied,
            QuantityUpdate::Removed | QuantityUpdate::NotInCart => 0,
        }
    }
}

/// A shopping cart: an ordered list of lines, at most one per product.
///
/// Serializes as a bare JSON array of lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, merging duplicate codes and dropping
    /// lines with a non-positive quantity.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity < 1 {
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.code == line.code) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for a product.
    pub fn line(&self, code: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.code == code)
    }

    /// Units of a product currently in the cart.
    pub fn quantity_of(&self, code: &str) -> i64 {
        self.line(code).map(|l| l.quantity).unwrap_or(0)
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines (the badge count).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Add units of a product, merging into an existing line.
    ///
    /// Fails without touching the cart if the quantity is below 1, the
    /// product has no stock, or the merged quantity would exceed stock.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<i64, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !product.in_stock() {
            return Err(CommerceError::OutOfStock(product.code.to_string()));
        }

        let in_cart = self.quantity_of(product.code.as_str());
        let new_quantity = in_cart
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;
        if !product.can_fulfill(new_quantity) {
            return Err(CommerceError::QuantityExceedsStock {
                code: product.code.to_string(),
                requested: quantity,
                in_cart,
                stock: product.stock,
            });
        }

        match self.lines.iter_mut().find(|l| l.code == product.code) {
            Some(line) => {
                line.quantity = new_quantity;
                line.price = product.price;
                line.name = product.name.clone();
            }
            None => self.lines.push(CartLine::new(product, quantity)),
        }
        Ok(new_quantity)
    }

    /// Set a line's quantity.
    ///
    /// Below 1 removes the line, as does a product that has sold out since
    /// it was added; anything else is clamped to `[1, stock]`.
    pub fn set_quantity(&mut self, product: &Product, requested: i64) -> QuantityUpdate {
        let Some(index) = self.lines.iter().position(|l| l.code == product.code) else {
            return QuantityUpdate::NotInCart;
        };
        if requested < 1 || !product.in_stock() {
            self.lines.remove(index);
            return QuantityUpdate::Removed;
        }

        let applied = requested.min(product.stock).max(1);
        self.lines[index].quantity = applied;
        if applied == requested {
            QuantityUpdate::Updated { quantity: applied }
        } else {
            QuantityUpdate::Clamped { requested, applied }
        }
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.code != code);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
