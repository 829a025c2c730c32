//! Affiliate discount policy.
//!
//! Students and staff with an institutional email (DUOC UC by default) get a
//! flat percentage off every order.

use crate::error::CommerceError;
use crate::money::Clp;
use serde::{Deserialize, Serialize};

/// Default affiliate discount, in percent.
pub const DEFAULT_AFFILIATE_PERCENT: u32 = 20;

/// Default affiliate email domains.
pub const DEFAULT_AFFILIATE_DOMAINS: [&str; 2] = ["duoc.cl", "duocuc.cl"];

/// Email-domain based discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AffiliateDiscount {
    /// Percentage off the subtotal.
    pub percent: u32,
    /// Email domains that qualify; subdomains qualify too.
    pub domains: Vec<String>,
}

impl AffiliateDiscount {
    /// Create a policy.
    pub fn new(percent: u32, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            percent,
            domains: domains
                .into_iter()
                .map(|d| d.into().trim().to_lowercase())
                .collect(),
        }
    }

    /// Check whether an email belongs to an affiliate domain.
    pub fn is_affiliate(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        let Some((_, domain)) = email.rsplit_once('@') else {
            return false;
        };
        self.domains.iter().any(|d| {
            domain == d
                || domain
                    .strip_suffix(d.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Discount rate as a fraction, 0 for non-affiliates.
    pub fn rate_for(&self, email: &str) -> f64 {
        if self.is_affiliate(email) {
            f64::from(self.percent) / 100.0
        } else {
            0.0
        }
    }

    /// Discount on a subtotal, rounded half up.
    pub fn discount(&self, subtotal: Clp, affiliate: bool) -> Result<Clp, CommerceError> {
        if affiliate {
            subtotal
                .checked_percentage(self.percent)
                .ok_or(CommerceError::Overflow)
        } else {
            Ok(Clp::zero())
        }
    }

    /// Unit price shown to affiliates.
    pub fn member_price(&self, price: Clp) -> Clp {
        price.percentage(100u32.saturating_sub(self.percent))
    }
}

impl Default for AffiliateDiscount {
    fn default() -> Self {
        Self::new(DEFAULT_AFFILIATE_PERCENT, DEFAULT_AFFILIATE_DOMAINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affiliate_domains() {
        let policy = AffiliateDiscount::default();
        assert!(policy.is_affiliate("ana@duoc.cl"));
        assert!(policy.is_affiliate("  Ana@DuocUC.cl "));
        assert!(policy.is_affiliate("profe@alumnos.duoc.cl"));
        assert!(!policy.is_affiliate("ana@notduoc.cl"));
        assert!(!policy.is_affiliate("ana@gmail.com"));
        assert!(!policy.is_affiliate("duoc.cl"));
    }

    #[test]
    fn test_discount_amounts() {
        let policy = AffiliateDiscount::default();
        assert_eq!(policy.discount(Clp::new(59_980), true).unwrap(), Clp::new(11_996));
        assert_eq!(policy.discount(Clp::new(59_980), false).unwrap(), Clp::zero());
        assert_eq!(policy.rate_for("x@duoc.cl"), 0.2);
        assert_eq!(policy.rate_for("x@gmail.com"), 0.0);
    }

    #[test]
    fn test_member_price() {
        let policy = AffiliateDiscount::default();
        assert_eq!(policy.member_price(Clp::new(29_990)), Clp::new(23_992));
        assert_eq!(policy.member_price(Clp::new(14_990)), Clp::new(11_992));
    }

    #[test]
    fn test_discount_overflow_is_an_error() {
        let policy = AffiliateDiscount::default();
        let err = policy.discount(Clp::new(i64::MAX / 10), true).unwrap_err();
        assert_eq!(err.code(), "OVERFLOW");
        assert_eq!(policy.discount(Clp::new(i64::MAX / 10), false).unwrap(), Clp::zero());
    }
}
