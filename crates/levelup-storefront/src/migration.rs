//! One-time migration of data written by older versions of the shop.
//!
//! Older pages used several key names for the same thing and stored whole
//! user objects where a pointer was meant. Version 1 is the canonical layout
//! in [`crate::keys`]; legacy field names are absorbed by serde aliases on the
//! record types, so this module only has to move and merge values.

use crate::keys::{self, legacy};
use levelup_auth::{AccountRules, User};
use levelup_cache::{Cache, CacheError, KvStore};
use levelup_commerce::cart::{Cart, CartLine};
use levelup_commerce::checkout::Order;
use levelup_commerce::ids::UserId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Current storage layout version.
pub const SCHEMA_VERSION: u32 = 1;

/// What a migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Lines recovered into the cart.
    pub cart_lines: usize,
    pub users_imported: usize,
    pub orders_imported: usize,
    /// Whether a legacy sign-in was turned into a session pointer.
    pub session_restored: bool,
    pub removed_keys: Vec<String>,
}

impl MigrationReport {
    /// Check if the store was already up to date.
    pub fn is_noop(&self) -> bool {
        self.from_version == self.to_version
    }
}

/// Bring the store up to [`SCHEMA_VERSION`]. Running it again is a no-op.
pub fn migrate<S: KvStore>(
    cache: &mut Cache<S>,
    rules: &AccountRules,
) -> Result<MigrationReport, CacheError> {
    let from_version: u32 = cache.get_or_default(keys::SCHEMA_VERSION);
    let mut report = MigrationReport {
        from_version,
        to_version: from_version.max(SCHEMA_VERSION),
        ..Default::default()
    };
    if from_version >= SCHEMA_VERSION {
        debug!(version = from_version, "Store schema up to date");
        return Ok(report);
    }

    report.cart_lines = migrate_cart(cache)?;
    let (users_imported, session_restored) = migrate_users(cache, rules)?;
    report.users_imported = users_imported;
    report.session_restored = session_restored;
    report.orders_imported = migrate_orders(cache)?;
    migrate_last_order(cache)?;
    migrate_ref_counts(cache)?;

    let stale: Vec<&str> = legacy::CART
        .into_iter()
        .chain(legacy::USER_LISTS)
        .chain(legacy::CURRENT_USER)
        .chain([legacy::SESSION_EMAIL])
        .chain(legacy::ORDERS)
        .chain(legacy::LAST_ORDER)
        .chain(legacy::REF_COUNTS)
        .chain(legacy::DERIVED)
        .collect();
    for key in stale {
        if cache.exists(key)? {
            cache.delete(key)?;
            report.removed_keys.push(key.to_string());
        }
    }

    cache.set(keys::SCHEMA_VERSION, &SCHEMA_VERSION)?;
    info!(
        from = from_version,
        to = SCHEMA_VERSION,
        users = report.users_imported,
        orders = report.orders_imported,
        removed = report.removed_keys.len(),
        "Migrated store"
    );
    Ok(report)
}

fn migrate_cart<S: KvStore>(cache: &mut Cache<S>) -> Result<usize, CacheError> {
    let current: Cart = cache.get_or_default(keys::CART);
    if !current.is_empty() {
        return Ok(0);
    }
    for key in legacy::CART {
        let lines: Vec<CartLine> = read_list(cache, key);
        if lines.is_empty() {
            continue;
        }
        let cart = Cart::from_lines(lines);
        cache.set(keys::CART, &cart)?;
        debug!(key, lines = cart.unique_item_count(), "Recovered legacy cart");
        return Ok(cart.unique_item_count());
    }
    Ok(0)
}

fn migrate_users<S: KvStore>(
    cache: &mut Cache<S>,
    rules: &AccountRules,
) -> Result<(usize, bool), CacheError> {
    let mut users: Vec<User> = read_list(cache, keys::USERS);
    let mut candidates = Vec::new();
    let mut signed_in_email = None;

    // levelup_session used to hold the whole user object
    let session = read_value(cache, keys::SESSION);
    if let Some(value @ Value::Object(_)) = &session {
        if let Some(user) = parse_user(value.clone(), rules) {
            signed_in_email = Some(user.email.clone());
            candidates.push(user);
        }
    }
    for key in legacy::USER_LISTS {
        candidates.extend(
            read_items(cache, key)
                .into_iter()
                .filter_map(|v| parse_user(v, rules)),
        );
    }
    for key in legacy::CURRENT_USER {
        if let Some(user) = read_value(cache, key).and_then(|v| parse_user(v, rules)) {
            signed_in_email.get_or_insert_with(|| user.email.clone());
            candidates.push(user);
        }
    }
    if signed_in_email.is_none() {
        if let Some(Value::String(email)) = read_value(cache, legacy::SESSION_EMAIL) {
            signed_in_email = Some(email.trim().to_lowercase());
        }
    }

    let mut imported = 0;
    for user in candidates {
        if !users.iter().any(|u| u.has_email(&user.email)) {
            users.push(user);
            imported += 1;
        }
    }
    if imported > 0 {
        cache.set(keys::USERS, &users)?;
    }

    let pointer_valid = matches!(
        &session,
        Some(Value::String(id)) if users.iter().any(|u| u.id == id.as_str())
    );
    let mut restored = false;
    if !pointer_valid {
        let target: Option<&UserId> = signed_in_email
            .as_deref()
            .and_then(|email| users.iter().find(|u| u.has_email(email)))
            .map(|u| &u.id);
        match target {
            Some(id) => {
                cache.set(keys::SESSION, id)?;
                restored = true;
            }
            None if session.is_some() => cache.delete(keys::SESSION)?,
            None => {}
        }
    }
    Ok((imported, restored))
}

fn migrate_orders<S: KvStore>(cache: &mut Cache<S>) -> Result<usize, CacheError> {
    let mut orders: Vec<Order> = read_list(cache, keys::ORDERS);
    let mut imported = 0;
    for key in legacy::ORDERS {
        for order in read_items(cache, key).into_iter().filter_map(parse_order) {
            if !orders.iter().any(|o| o.id == order.id) {
                orders.push(order);
                imported += 1;
            }
        }
    }
    if imported > 0 {
        orders.sort_by_key(|o| o.timestamp);
        cache.set(keys::ORDERS, &orders)?;
    }
    Ok(imported)
}

fn migrate_last_order<S: KvStore>(cache: &mut Cache<S>) -> Result<(), CacheError> {
    if cache.exists(keys::LAST_ORDER)? {
        return Ok(());
    }
    let found = legacy::LAST_ORDER
        .iter()
        .find_map(|key| match read_value(cache, key) {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id.trim().to_string()),
            _ => None,
        });
    if let Some(id) = found {
        cache.set(keys::LAST_ORDER, &id)?;
    }
    Ok(())
}

fn migrate_ref_counts<S: KvStore>(cache: &mut Cache<S>) -> Result<(), CacheError> {
    let mut counts: BTreeMap<String, u64> = cache.get_or_default(keys::REF_COUNTS);
    let mut merged = false;
    for key in legacy::REF_COUNTS {
        let Some(Value::Object(map)) = read_value(cache, key) else {
            continue;
        };
        for (code, count) in map {
            if let Some(count) = count.as_u64() {
                *counts.entry(code.trim().to_uppercase()).or_default() += count;
                merged = true;
            }
        }
    }
    if merged {
        cache.set(keys::REF_COUNTS, &counts)?;
    }
    Ok(())
}

/// Read a stored value. Text that is not JSON is taken as a plain string,
/// which is how some older pages wrote single values.
fn read_value<S: KvStore>(cache: &Cache<S>, key: &str) -> Option<Value> {
    match cache.get_raw(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(_) => Some(Value::String(raw)),
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "Skipping unreadable key");
            None
        }
    }
}

fn read_items<S: KvStore>(cache: &Cache<S>, key: &str) -> Vec<Value> {
    match read_value(cache, key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Read a list, skipping elements that do not parse.
fn read_list<S: KvStore, T: DeserializeOwned>(cache: &Cache<S>, key: &str) -> Vec<T> {
    read_items(cache, key)
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect()
}

fn parse_user(value: Value, rules: &AccountRules) -> Option<User> {
    let mut user: User = serde_json::from_value(value).ok()?;
    user.email = user.email.trim().to_lowercase();
    if user.email.is_empty() {
        return None;
    }
    if user.name.trim().is_empty() {
        user.name = user
            .email
            .split('@')
            .next()
            .unwrap_or("Usuario")
            .to_string();
    }
    user.refresh_affiliate(&rules.discount);
    Some(user)
}

fn parse_order(mut value: Value) -> Option<Order> {
    // some pages kept the buyer's email at the top level
    if let Some(obj) = value.as_object_mut() {
        if !obj.contains_key("user") {
            let email = obj.get("email").cloned().unwrap_or(Value::Null);
            let name = obj.get("name").cloned().unwrap_or_else(|| json!(""));
            obj.insert("user".to_string(), json!({ "name": name, "email": email }));
        }
    }
    let mut order: Order = serde_json::from_value(value).ok()?;
    order.user.email = order.user.email.trim().to_lowercase();
    for line in &mut order.line_items {
        if line.subtotal.is_zero() {
            let Some(subtotal) = line.price.checked_mul(line.qty) else {
                warn!(
                    order_id = %order.id,
                    code = %line.code,
                    "Skipping legacy order with an overflowing line"
                );
                return None;
            };
            line.subtotal = subtotal;
        }
    }
    Some(order)
}
