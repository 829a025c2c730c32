//! Loyalty points and tiers.
//!
//! Points are never stored as a source of truth; they are recomputed from the
//! order history whenever needed.

use crate::checkout::Order;
use crate::ids::ReferralCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order total that earns one block of points.
pub const POINTS_STEP_CLP: i64 = 10_000;
/// Points per full step of order total.
pub const POINTS_PER_STEP: i64 = 100;
/// Points per order placed by someone you referred.
pub const POINTS_PER_REFERRAL: i64 = 200;

/// Loyalty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl Tier {
    /// Tier reached with `points`.
    pub fn from_points(points: i64) -> Self {
        match points {
            p if p >= 1000 => Tier::Diamond,
            p if p >= 500 => Tier::Gold,
            p if p >= 200 => Tier::Silver,
            _ => Tier::Bronze,
        }
    }

    /// Points needed to enter this tier.
    pub fn threshold(&self) -> i64 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 200,
            Tier::Gold => 500,
            Tier::Diamond => 1000,
        }
    }

    /// The next tier up, if any.
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Diamond),
            Tier::Diamond => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Diamond => "DIAMOND",
        }
    }

    /// Name shown in the shop.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronce",
            Tier::Silver => "Plata",
            Tier::Gold => "Oro",
            Tier::Diamond => "Diamante",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points earned by a single order.
pub fn order_points(order: &Order) -> i64 {
    order.total.amount().max(0) / POINTS_STEP_CLP * POINTS_PER_STEP
}

/// Points split by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointsBreakdown {
    /// From the member's own purchases.
    pub purchase: i64,
    /// From orders placed by people the member referred.
    pub referral: i64,
    /// Number of referred orders.
    pub referred_orders: usize,
}

impl PointsBreakdown {
    /// Compute a member's points from the full order history.
    pub fn compute(orders: &[Order], email: &str, referral_code: Option<&ReferralCode>) -> Self {
        let purchase = orders
            .iter()
            .filter(|o| o.placed_by(email))
            .map(order_points)
            .sum();
        let referred_orders = referral_code.map_or(0, |code| {
            orders
                .iter()
                .filter(|o| o.referral.as_ref() == Some(code))
                .count()
        });
        Self {
            purchase,
            referral: referred_orders as i64 * POINTS_PER_REFERRAL,
            referred_orders,
        }
    }

    /// Purchase plus referral points.
    pub fn total(&self) -> i64 {
        self.purchase + self.referral
    }

    /// Tier for the total.
    pub fn tier(&self) -> Tier {
        Tier::from_points(self.total())
    }

    /// Points still missing for the next tier, if there is one.
    pub fn points_to_next_tier(&self) -> Option<i64> {
        self.tier().next().map(|t| t.threshold() - self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{CustomerSnapshot, Order};
    use crate::ids::OrderId;
    use crate::money::Clp;
    use chrono::Utc;

    fn order(email: &str, total: i64, referral: Option<&str>) -> Order {
        Order {
            id: OrderId::new("LUG-20251005-TEST"),
            timestamp: Utc::now(),
            user: CustomerSnapshot {
                name: "X".into(),
                surname: None,
                email: email.into(),
                is_duoc_affiliate: false,
            },
            line_items: Vec::new(),
            subtotal: Clp::new(total),
            discount: Clp::zero(),
            total: Clp::new(total),
            referral: referral.map(ReferralCode::new),
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_points(0), Tier::Bronze);
        assert_eq!(Tier::from_points(199), Tier::Bronze);
        assert_eq!(Tier::from_points(200), Tier::Silver);
        assert_eq!(Tier::from_points(500), Tier::Gold);
        assert_eq!(Tier::from_points(999), Tier::Gold);
        assert_eq!(Tier::from_points(1000), Tier::Diamond);
    }

    #[test]
    fn test_order_points_floor() {
        assert_eq!(order_points(&order("a@x.cl", 9_999, None)), 0);
        assert_eq!(order_points(&order("a@x.cl", 59_980, None)), 500);
        assert_eq!(order_points(&order("a@x.cl", 1_299_990, None)), 12_900);
    }

    #[test]
    fn test_breakdown() {
        let code = ReferralCode::new("LUG-AB12");
        let orders = vec![
            order("ana@duoc.cl", 47_984, None),
            order("ANA@duoc.cl", 24_990, None),
            order("friend@gmail.com", 14_990, Some("LUG-AB12")),
            order("other@gmail.com", 14_990, Some("LUG-ZZZZ")),
        ];
        let points = PointsBreakdown::compute(&orders, "ana@duoc.cl", Some(&code));
        assert_eq!(points.purchase, 400 + 200);
        assert_eq!(points.referred_orders, 1);
        assert_eq!(points.referral, 200);
        assert_eq!(points.total(), 800);
        assert_eq!(points.tier(), Tier::Gold);
        assert_eq!(points.points_to_next_tier(), Some(200));
    }

    #[test]
    fn test_no_orders() {
        let points = PointsBreakdown::compute(&[], "nobody@x.cl", None);
        assert_eq!(points.total(), 0);
        assert_eq!(points.tier(), Tier::Bronze);
        assert_eq!(Tier::Diamond.next(), None);
    }

    #[test]
    fn test_tier_serde() {
        assert_eq!(serde_json::to_string(&Tier::Diamond).unwrap(), "\"DIAMOND\"");
    }
}
