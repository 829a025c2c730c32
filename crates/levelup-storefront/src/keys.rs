//! Storage key names.

use levelup_cache::cache_key;

pub const USERS: &str = "levelup_users";
pub const SESSION: &str = "levelup_session";
pub const REMEMBER: &str = "levelup_remember";
pub const CART: &str = "levelup_cart";
pub const ORDERS: &str = "levelup_orders";
pub const LAST_ORDER: &str = "levelup_last_order";
pub const REF_COUNTS: &str = "levelup_ref_counts";
pub const REVIEWS_PREFIX: &str = "levelup_reviews";
pub const SCHEMA_VERSION: &str = "levelup_schema_version";

/// Key holding a product's reviews.
pub fn reviews(code: &str) -> String {
    cache_key!(REVIEWS_PREFIX, code)
}

/// Keys written by older versions of the shop.
pub mod legacy {
    pub const CART: [&str; 3] = ["cart", "lug_cart", "STORAGE_CART"];
    pub const USER_LISTS: [&str; 1] = ["users"];
    pub const CURRENT_USER: [&str; 2] = ["lug_user", "lv_user"];
    pub const SESSION_EMAIL: &str = "sessionEmail";
    pub const ORDERS: [&str; 3] = ["orders", "lug_orders", "orderHistory"];
    pub const LAST_ORDER: [&str; 2] = ["last_order", "lug_last_order"];
    pub const REF_COUNTS: [&str; 3] = ["ref_counts", "lug_ref_counts", "levelup_refs"];
    /// Derived values that are recomputed now.
    pub const DERIVED: [&str; 3] = ["purchase_points", "lug_purchase_points", "levelup_points"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_key() {
        assert_eq!(reviews("JM001"), "levelup_reviews:JM001");
    }
}
