//! Storefront rules configuration.

use levelup_auth::AccountRules;
use levelup_commerce::cart::{AffiliateDiscount, DEFAULT_AFFILIATE_DOMAINS, DEFAULT_AFFILIATE_PERCENT};
use levelup_commerce::checkout::{CheckoutRules, DEFAULT_MINIMUM_AGE};
use levelup_commerce::community::DEFAULT_COMMUNITY_RATE_PERCENT;
use serde::{Deserialize, Serialize};

/// Business rules, read from the `[rules]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRules {
    /// Minimum age to register and to buy.
    #[serde(default = "default_minimum_age")]
    pub minimum_age: u32,

    /// Affiliate discount, in percent.
    #[serde(default = "default_affiliate_percent")]
    pub affiliate_discount_percent: u32,

    /// Email domains that get the affiliate discount.
    #[serde(default = "default_affiliate_domains")]
    pub affiliate_domains: Vec<String>,

    /// Share of sales going to the community fund, in percent.
    #[serde(default = "default_community_rate")]
    pub community_rate_percent: u32,
}

fn default_minimum_age() -> u32 {
    DEFAULT_MINIMUM_AGE
}

fn default_affiliate_percent() -> u32 {
    DEFAULT_AFFILIATE_PERCENT
}

fn default_affiliate_domains() -> Vec<String> {
    DEFAULT_AFFILIATE_DOMAINS.iter().map(|d| d.to_string()).collect()
}

fn default_community_rate() -> u32 {
    DEFAULT_COMMUNITY_RATE_PERCENT
}

impl Default for StoreRules {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
            affiliate_discount_percent: default_affiliate_percent(),
            affiliate_domains: default_affiliate_domains(),
            community_rate_percent: default_community_rate(),
        }
    }
}

impl StoreRules {
    /// The affiliate discount policy.
    pub fn discount(&self) -> AffiliateDiscount {
        AffiliateDiscount::new(
            self.affiliate_discount_percent,
            self.affiliate_domains.iter().cloned(),
        )
    }

    /// Rules for checkout.
    pub fn checkout_rules(&self) -> CheckoutRules {
        CheckoutRules {
            minimum_age: self.minimum_age,
            discount: self.discount(),
        }
    }

    /// Rules for registration and profile edits.
    pub fn account_rules(&self) -> AccountRules {
        AccountRules {
            minimum_age: self.minimum_age,
            discount: self.discount(),
        }
    }
}
