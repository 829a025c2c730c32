//! Cart to order reconciliation.

use crate::calendar::{age_on, Clock};
use crate::cart::{AffiliateDiscount, Cart, CartPricing};
use crate::catalog::Catalog;
use crate::checkout::{CustomerSnapshot, Order};
use crate::ids::{OrderId, ReferralCode};
use crate::CommerceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default minimum purchase age.
pub const DEFAULT_MINIMUM_AGE: u32 = 18;

/// Store rules applied at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRules {
    /// Minimum age to buy.
    pub minimum_age: u32,
    /// Affiliate discount policy.
    pub discount: AffiliateDiscount,
}

impl Default for CheckoutRules {
    fn default() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
            discount: AffiliateDiscount::default(),
        }
    }
}

/// What checkout needs to know about the buyer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Purchaser<'a> {
    /// Display name.
    pub name: &'a str,
    /// Email.
    pub email: &'a str,
    /// Birthdate; `None` is treated as underage.
    pub birthdate: Option<NaiveDate>,
    /// Code the purchaser registered with.
    pub referred_by: Option<&'a ReferralCode>,
}

/// Check the checkout preconditions in order: user present, user old
/// enough, cart not empty. The first failure wins.
pub fn check_preconditions(
    purchaser: Option<&Purchaser<'_>>,
    cart: &Cart,
    rules: &CheckoutRules,
    today: NaiveDate,
) -> Result<(), CommerceError> {
    let purchaser = purchaser.ok_or(CommerceError::NoUser)?;

    let age = purchaser.birthdate.map(|b| age_on(b, today));
    if age.map_or(true, |a| a < rules.minimum_age) {
        return Err(CommerceError::Underage {
            age,
            minimum: rules.minimum_age,
        });
    }

    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    Ok(())
}

/// Turn a cart into an order.
///
/// Lines whose product is gone from the catalog are dropped. Prices come
/// from the catalog. The caller persists the order and clears the cart.
pub fn build_order(
    purchaser: Option<&Purchaser<'_>>,
    cart: &Cart,
    catalog: &Catalog,
    rules: &CheckoutRules,
    clock: &dyn Clock,
) -> Result<Order, CommerceError> {
    check_preconditions(purchaser, cart, rules, clock.today())?;
    let purchaser = purchaser.ok_or(CommerceError::NoUser)?;

    let pricing = CartPricing::compute(cart, catalog, &rules.discount, Some(purchaser.email))?;
    let now = clock.now();
    let order = Order {
        id: OrderId::generate(now.date_naive()),
        timestamp: now,
        user: CustomerSnapshot {
            name: purchaser.name.to_string(),
            surname: None,
            email: purchaser.email.to_lowercase(),
            is_duoc_affiliate: pricing.affiliate,
        },
        subtotal: pricing.subtotal,
        discount: pricing.discount,
        total: pricing.total,
        line_items: pricing.line_items.into_iter().map(Into::into).collect(),
        referral: purchaser.referred_by.cloned(),
    };

    debug!(order_id = %order.id, total = %order.total, "Built order");
    Ok(order)
}
