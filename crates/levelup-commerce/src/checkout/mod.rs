//! Checkout module.
//!
//! Turns a cart plus a purchaser into an immutable order.

mod flow;
mod order;

pub use flow::{build_order, check_preconditions, CheckoutRules, Purchaser, DEFAULT_MINIMUM_AGE};
pub use order::{CustomerSnapshot, Order, OrderLineItem};
