//! Order types.

use crate::cart::LineItemPricing;
use crate::ids::{OrderId, ProductCode, ReferralCode};
use crate::money::Clp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who placed an order, copied from the user at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSnapshot {
    /// Full name.
    #[serde(alias = "nombre")]
    pub name: String,
    /// Surname, only present on older orders that stored it separately.
    #[serde(default, alias = "apellido", skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Email, lowercase.
    pub email: String,
    /// Whether the affiliate discount applied.
    #[serde(default, alias = "isDuoc")]
    pub is_duoc_affiliate: bool,
}

impl CustomerSnapshot {
    /// Name and surname joined for display.
    pub fn display_name(&self) -> String {
        match self.surname.as_deref().map(str::trim) {
            Some(surname) if !surname.is_empty() => format!("{} {}", self.name, surname),
            _ => self.name.clone(),
        }
    }
}

/// One purchased product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Product code.
    pub code: ProductCode,
    /// Product name at purchase time.
    pub name: String,
    /// Unit price at purchase time.
    pub price: Clp,
    /// Units bought.
    #[serde(alias = "quantity")]
    pub qty: i64,
    /// price * qty.
    #[serde(default)]
    pub subtotal: Clp,
}

impl From<LineItemPricing> for OrderLineItem {
    fn from(line: LineItemPricing) -> Self {
        Self {
            code: line.code,
            name: line.name,
            price: line.unit_price,
            qty: line.quantity,
            subtotal: line.subtotal,
        }
    }
}

/// An immutable, completed purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order id, `LUG-YYYYMMDD-XXXX`.
    pub id: OrderId,
    /// When the order was placed.
    #[serde(alias = "date", alias = "fecha")]
    pub timestamp: DateTime<Utc>,
    /// Purchaser snapshot.
    pub user: CustomerSnapshot,
    /// Purchased lines.
    #[serde(alias = "items")]
    pub line_items: Vec<OrderLineItem>,
    /// Sum of line subtotals.
    pub subtotal: Clp,
    /// Affiliate discount.
    #[serde(default, alias = "descuento")]
    pub discount: Clp,
    /// subtotal - discount.
    pub total: Clp,
    /// Referral code of whoever referred the purchaser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<ReferralCode>,
}

impl Order {
    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|l| l.qty).sum()
    }

    /// Check if the order was placed by `email`, ignoring case.
    pub fn placed_by(&self, email: &str) -> bool {
        self.user.email.to_lowercase() == email.trim().to_lowercase()
    }

    /// Check the arithmetic invariants: every line subtotal is price * qty,
    /// they sum to the subtotal, and total = subtotal - discount.
    pub fn is_consistent(&self) -> bool {
        let lines_ok = self
            .line_items
            .iter()
            .all(|l| l.price.checked_mul(l.qty) == Some(l.subtotal));
        let sum: Clp = self.line_items.iter().map(|l| l.subtotal).sum();
        lines_ok && sum == self.subtotal && self.total == self.subtotal - self.discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Order {
        Order {
            id: OrderId::new("LUG-20251005-AB12"),
            timestamp: Utc::now(),
            user: CustomerSnapshot {
                name: "Ana".into(),
                surname: None,
                email: "ana@duoc.cl".into(),
                is_duoc_affiliate: true,
            },
            line_items: vec![OrderLineItem {
                code: "JM001".into(),
                name: "Catan".into(),
                price: Clp::new(29_990),
                qty: 2,
                subtotal: Clp::new(59_980),
            }],
            subtotal: Clp::new(59_980),
            discount: Clp::new(11_996),
            total: Clp::new(47_984),
            referral: None,
        }
    }

    #[test]
    fn test_consistency() {
        let mut order = sample();
        assert!(order.is_consistent());
        assert_eq!(order.item_count(), 2);
        order.total = Clp::new(1);
        assert!(!order.is_consistent());
    }

    #[test]
    fn test_placed_by_ignores_case() {
        assert!(sample().placed_by("ANA@duoc.cl"));
        assert!(!sample().placed_by("otra@duoc.cl"));

        let mut order = sample();
        order.user.email = "ñandú@duoc.cl".into();
        assert!(order.placed_by("ÑANDÚ@duoc.cl"));
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{
            "id": "LUG-20250101-ZZ99",
            "timestamp": "2025-01-01T15:30:00.000Z",
            "user": {"nombre": "Ana", "apellido": "Rojas", "email": "ana@gmail.com", "isDuoc": false},
            "items": [{"code": "JM002", "name": "Carcassonne", "price": 24990, "qty": 1, "subtotal": 24990}],
            "subtotal": 24990,
            "descuento": 0,
            "total": 24990
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.user.display_name(), "Ana Rojas");
        assert_eq!(order.line_items.len(), 1);
        assert!(order.is_consistent());
        assert_eq!(order.referral, None);
    }
}
