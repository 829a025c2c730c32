//! The state-owning storefront service.
//!
//! Every page action is a method here. Each method reads what it needs from
//! the store, applies the domain rules from `levelup-commerce` and
//! `levelup-auth`, writes the result back and notifies subscribers.

use crate::config::StoreRules;
use crate::error::Result;
use crate::events::{StoreEvent, Subscribers};
use crate::keys;
use crate::migration::{self, MigrationReport};
use levelup_auth::{
    current_user, AuthError, AuthSession, ProfileUpdate, RegistrationForm, User, UserDirectory,
};
use levelup_cache::{Cache, KvStore};
use levelup_commerce::calendar::{Clock, SystemClock};
use levelup_commerce::cart::{Cart, CartPricing, QuantityUpdate};
use levelup_commerce::catalog::{Catalog, Product, Review, RELATED_LIMIT};
use levelup_commerce::checkout::{build_order, Order};
use levelup_commerce::community::CommunityReport;
use levelup_commerce::ids::ReferralCode;
use levelup_commerce::loyalty::{PointsBreakdown, Tier};
use levelup_commerce::search::CatalogQuery;
use levelup_commerce::{Clp, CommerceError};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A member's loyalty and purchase summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub points: PointsBreakdown,
    pub tier: Tier,
    /// Points still missing for the next tier; `None` at the top tier.
    pub points_to_next_tier: Option<i64>,
    pub purchase_count: usize,
    pub total_spent: Clp,
    /// Sum of discounts received.
    pub savings: Clp,
    pub referral_code: ReferralCode,
    /// How many people registered with this member's code.
    pub referral_registrations: u64,
    pub affiliate: bool,
}

/// The shop, backed by one key-value store.
pub struct Storefront<S> {
    cache: Cache<S>,
    catalog: Catalog,
    rules: StoreRules,
    clock: Box<dyn Clock>,
    subscribers: Subscribers,
}

impl<S: KvStore> Storefront<S> {
    /// Wrap a store with the built-in catalog and default rules.
    ///
    /// Does not migrate; use [`Storefront::open`] for stores that may hold
    /// data from older versions.
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            catalog: Catalog::builtin(),
            rules: StoreRules::default(),
            clock: Box::new(SystemClock),
            subscribers: Subscribers::default(),
        }
    }

    /// Wrap a store and bring it up to the current schema.
    pub fn open(store: S, rules: StoreRules) -> Result<Self> {
        let mut shop = Self::new(store).with_rules(rules);
        shop.migrate()?;
        Ok(shop)
    }

    pub fn with_rules(mut self, rules: StoreRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run the legacy-key migration. A no-op on an up-to-date store.
    pub fn migrate(&mut self) -> Result<MigrationReport> {
        let report = migration::migrate(&mut self.cache, &self.rules.account_rules())?;
        if !report.is_noop() {
            self.emit(StoreEvent::UsersChanged);
        }
        Ok(report)
    }

    /// Register a change callback.
    pub fn subscribe(&mut self, callback: impl Fn(&StoreEvent) + 'static) {
        self.subscribers.add(Box::new(callback));
    }

    fn emit(&self, event: StoreEvent) {
        debug!(?event, "Store event");
        self.subscribers.emit(&event);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &StoreRules {
        &self.rules
    }

    /// Today's date according to the storefront clock.
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &S {
        self.cache.store()
    }

    pub fn into_store(self) -> S {
        self.cache.into_inner()
    }

    // ---- catalog ----

    /// Look up a product.
    pub fn product(&self, code: &str) -> Result<&Product> {
        self.catalog
            .by_code(code.trim())
            .ok_or_else(|| CommerceError::ProductNotFound(code.trim().to_string()).into())
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.search(query)
    }

    /// Products shown next to `code` on its detail page.
    pub fn related(&self, code: &str) -> Vec<&Product> {
        self.catalog.related(code.trim(), RELATED_LIMIT)
    }

    /// Price after the affiliate discount.
    pub fn member_price(&self, product: &Product) -> Clp {
        self.rules.discount().member_price(product.price)
    }

    /// Price the current visitor pays: the member price for affiliates.
    pub fn display_price(&self, product: &Product) -> Clp {
        match self.current_user() {
            Some(user) if self.rules.discount().is_affiliate(&user.email) => {
                self.member_price(product)
            }
            _ => product.price,
        }
    }

    // ---- cart ----

    pub fn cart(&self) -> Cart {
        self.cache.get_or_default(keys::CART)
    }

    fn save_cart(&mut self, cart: &Cart) -> Result<()> {
        self.cache.set(keys::CART, cart)?;
        self.emit(StoreEvent::CartChanged {
            item_count: cart.item_count(),
        });
        Ok(())
    }

    /// Add units of a product. Returns the line's new quantity.
    ///
    /// The cart is left untouched on any failure.
    pub fn add_to_cart(&mut self, code: &str, quantity: i64) -> Result<i64> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity).into());
        }
        let mut cart = self.cart();
        let product = self
            .catalog
            .by_code(code.trim())
            .ok_or_else(|| CommerceError::ProductNotFound(code.trim().to_string()))?;
        let new_quantity = cart.add(product, quantity)?;
        debug!(code = %product.code, quantity = new_quantity, "Added to cart");
        self.save_cart(&cart)?;
        Ok(new_quantity)
    }

    /// Change a line's quantity. Below 1 removes the line; anything else is
    /// clamped to the product's stock.
    pub fn update_quantity(&mut self, code: &str, quantity: i64) -> Result<QuantityUpdate> {
        let code = code.trim();
        let mut cart = self.cart();
        let update = match self.catalog.by_code(code) {
            Some(product) => cart.set_quantity(product, quantity),
            None if quantity < 1 => {
                if cart.remove(code) {
                    QuantityUpdate::Removed
                } else {
                    QuantityUpdate::NotInCart
                }
            }
            None => return Err(CommerceError::ProductNotFound(code.to_string()).into()),
        };
        if update != QuantityUpdate::NotInCart {
            debug!(code, ?update, "Updated cart line");
            self.save_cart(&cart)?;
        }
        Ok(update)
    }

    /// Remove a line. Returns whether one was there.
    pub fn remove_from_cart(&mut self, code: &str) -> Result<bool> {
        let mut cart = self.cart();
        let removed = cart.remove(code.trim());
        if removed {
            self.save_cart(&cart)?;
        }
        Ok(removed)
    }

    pub fn clear_cart(&mut self) -> Result<()> {
        self.save_cart(&Cart::new())
    }

    /// Badge count: total units in the cart.
    pub fn cart_count(&self) -> i64 {
        self.cart().item_count()
    }

    /// Price the cart for the current visitor, as checkout would.
    pub fn cart_summary(&self) -> Result<CartPricing> {
        let user = self.current_user();
        let pricing = CartPricing::compute(
            &self.cart(),
            &self.catalog,
            &self.rules.discount(),
            user.as_ref().map(|u| u.email.as_str()),
        )?;
        Ok(pricing)
    }

    // ---- accounts ----

    /// Every registered user.
    pub fn users(&self) -> UserDirectory {
        self.cache.get_or_default(keys::USERS)
    }

    fn session(&self) -> Option<AuthSession> {
        self.cache.get_or_default(keys::SESSION)
    }

    /// The signed-in user, if the session points at one.
    pub fn current_user(&self) -> Option<User> {
        let directory = self.users();
        current_user(self.session().as_ref(), &directory).cloned()
    }

    fn require_user(&self) -> Result<User> {
        Ok(self.current_user().ok_or(AuthError::NoUser)?)
    }

    /// Email stored by a "remember me" login.
    pub fn remembered_email(&self) -> Option<String> {
        self.cache.get_or_default(keys::REMEMBER)
    }

    fn start_session(&mut self, user: &User) -> Result<()> {
        self.cache.set(keys::SESSION, &AuthSession::start(user))?;
        self.emit(StoreEvent::SessionChanged {
            user_id: Some(user.id.clone()),
        });
        Ok(())
    }

    /// Create an account and sign it in.
    pub fn register(&mut self, form: RegistrationForm) -> Result<User> {
        let mut directory = self.users();
        let user = directory
            .register(
                form,
                &self.rules.account_rules(),
                self.clock.today(),
                self.clock.now(),
            )?
            .clone();
        self.cache.set(keys::USERS, &directory)?;

        if let Some(code) = &user.referred_by {
            let mut counts = self.referral_counts();
            *counts.entry(code.to_string()).or_default() += 1;
            self.cache.set(keys::REF_COUNTS, &counts)?;
            debug!(referral = %code, "Counted referral");
        }

        info!(user_id = %user.id, "New account signed in");
        self.emit(StoreEvent::UsersChanged);
        self.start_session(&user)?;
        Ok(user)
    }

    /// Sign in. `remember` keeps the email for the next visit.
    pub fn login(&mut self, email: &str, password: &str, remember: bool) -> Result<User> {
        let user = self.users().authenticate(email, password)?.clone();
        if remember {
            self.cache.set(keys::REMEMBER, &user.email)?;
        } else {
            self.cache.delete(keys::REMEMBER)?;
        }
        info!(user_id = %user.id, "Signed in");
        self.start_session(&user)?;
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.cache.delete(keys::SESSION)?;
        debug!("Signed out");
        self.emit(StoreEvent::SessionChanged { user_id: None });
        Ok(())
    }

    /// Edit the signed-in user's profile.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<User> {
        let user = self.require_user()?;
        let mut directory = self.users();
        let updated = directory
            .update_profile(
                &user.id,
                update,
                &self.rules.account_rules(),
                self.clock.today(),
                self.clock.now(),
            )?
            .clone();
        self.cache.set(keys::USERS, &directory)?;
        info!(user_id = %updated.id, "Updated profile");
        self.emit(StoreEvent::UsersChanged);
        Ok(updated)
    }

    /// Remove the signed-in user, sign out and empty the cart.
    pub fn delete_account(&mut self) -> Result<User> {
        let user = self.require_user()?;
        let mut directory = self.users();
        let removed = directory
            .remove(&user.id)
            .ok_or_else(|| AuthError::UserNotFound(user.id.to_string()))?;
        self.cache.set(keys::USERS, &directory)?;
        info!(user_id = %removed.id, "Deleted account");
        self.emit(StoreEvent::UsersChanged);
        self.logout()?;
        self.clear_cart()?;
        Ok(removed)
    }

    /// Registration counts per referral code.
    pub fn referral_counts(&self) -> BTreeMap<String, u64> {
        self.cache.get_or_default(keys::REF_COUNTS)
    }

    /// A user's points from the full order history.
    pub fn points_for(&self, user: &User) -> PointsBreakdown {
        PointsBreakdown::compute(&self.orders(), &user.email, Some(&user.referral_code))
    }

    /// Loyalty and purchase summary of the signed-in user.
    pub fn profile_stats(&self) -> Result<ProfileStats> {
        let user = self.require_user()?;
        let orders = self.orders();
        let points = PointsBreakdown::compute(&orders, &user.email, Some(&user.referral_code));
        let mine: Vec<&Order> = orders.iter().filter(|o| o.placed_by(&user.email)).collect();
        let referral_registrations = self
            .referral_counts()
            .get(user.referral_code.as_str())
            .copied()
            .unwrap_or(0);

        Ok(ProfileStats {
            points,
            tier: points.tier(),
            points_to_next_tier: points.points_to_next_tier(),
            purchase_count: mine.len(),
            total_spent: mine.iter().map(|o| o.total).sum(),
            savings: mine.iter().map(|o| o.discount).sum(),
            referral_code: user.referral_code.clone(),
            referral_registrations,
            affiliate: user.is_duoc_affiliate,
        })
    }

    /// The signed-in user's orders, newest first.
    pub fn order_history(&self) -> Result<Vec<Order>> {
        let user = self.require_user()?;
        let mut mine: Vec<Order> = self
            .orders()
            .into_iter()
            .filter(|o| o.placed_by(&user.email))
            .collect();
        mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(mine)
    }

    // ---- orders ----

    /// Every order, in placement order.
    pub fn orders(&self) -> Vec<Order> {
        self.cache.get_or_default(keys::ORDERS)
    }

    /// Turn the cart into an order.
    ///
    /// Fails with `NO_USER`, `UNDERAGE` or `EMPTY`, checked in that order.
    /// On success the order is stored, becomes the last order and the cart
    /// is emptied.
    pub fn checkout(&mut self) -> Result<Order> {
        let mut directory = self.users();
        let session = self.session();
        let purchaser = current_user(session.as_ref(), &directory).map(User::purchaser);
        let order = build_order(
            purchaser.as_ref(),
            &self.cart(),
            &self.catalog,
            &self.rules.checkout_rules(),
            &*self.clock,
        )?;

        let mut orders = self.orders();
        orders.push(order.clone());
        self.cache.set(keys::ORDERS, &orders)?;
        self.cache.set(keys::LAST_ORDER, &order.id)?;
        self.save_cart(&Cart::new())?;

        // a purchase can move the buyer's and the referrer's totals
        for user in directory.users_mut() {
            user.points =
                PointsBreakdown::compute(&orders, &user.email, Some(&user.referral_code)).total();
        }
        self.cache.set(keys::USERS, &directory)?;

        info!(
            order_id = %order.id,
            total = %order.total,
            discount = %order.discount,
            "Placed order"
        );
        self.emit(StoreEvent::OrderPlaced {
            order_id: order.id.clone(),
        });
        Ok(order)
    }

    /// The order with `order_id`, else the last order placed.
    pub fn receipt(&self, order_id: Option<&str>) -> Result<Order> {
        let orders = self.orders();
        let requested = order_id.map(str::trim).filter(|id| !id.is_empty());
        if let Some(id) = requested {
            if let Some(order) = orders.iter().find(|o| o.id == id) {
                return Ok(order.clone());
            }
            debug!(order_id = id, "Order not found, falling back to last order");
        }

        let last: Option<String> = self.cache.get_or_default(keys::LAST_ORDER);
        last.and_then(|id| orders.into_iter().find(|o| o.id == id.as_str()))
            .ok_or_else(|| {
                CommerceError::OrderNotFound(requested.unwrap_or("last").to_string()).into()
            })
    }

    // ---- reviews ----

    /// A product's reviews, newest first.
    pub fn reviews(&self, code: &str) -> Vec<Review> {
        self.cache.get_or_default(&keys::reviews(code.trim()))
    }

    pub fn add_review(&mut self, code: &str, name: &str, rating: u8, text: &str) -> Result<Review> {
        let code = self.product(code)?.code.to_string();
        let review = Review::new(name, rating, text, self.clock.now())?;
        let mut reviews = self.reviews(&code);
        reviews.insert(0, review.clone());
        self.cache.set(&keys::reviews(&code), &reviews)?;
        debug!(code = %code, rating, "Added review");
        self.emit(StoreEvent::ReviewAdded { code });
        Ok(review)
    }

    // ---- community ----

    pub fn community_report(&self) -> CommunityReport {
        let orders = self.orders();
        let points_distributed: i64 = self
            .users()
            .users()
            .iter()
            .map(|u| PointsBreakdown::compute(&orders, &u.email, Some(&u.referral_code)).total())
            .sum();
        CommunityReport::build(
            &orders,
            self.rules.community_rate_percent,
            points_distributed,
            self.clock.today(),
        )
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Storefront<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("cache", &self.cache)
            .field("catalog", &self.catalog.len())
            .field("rules", &self.rules)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
