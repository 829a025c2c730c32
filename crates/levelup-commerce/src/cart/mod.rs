//! Shopping cart module.
//!
//! Contains types for the cart, its lines, pricing, and the affiliate discount.

mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, CartLine, QuantityUpdate};
pub use discount::{AffiliateDiscount, DEFAULT_AFFILIATE_DOMAINS, DEFAULT_AFFILIATE_PERCENT};
pub use pricing::{CartPricing, LineItemPricing};
