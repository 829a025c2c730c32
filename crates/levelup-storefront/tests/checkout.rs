mod common;

use common::{form, shop, shop_over};
use levelup_auth::RegistrationForm;
use levelup_cache::{KvStore, MemoryStore};
use levelup_commerce::calendar::FixedClock;
use levelup_commerce::Clp;
use levelup_storefront::StoreEvent;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_plain_checkout_totals() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 2).unwrap();

    let order = shop.checkout().unwrap();
    assert_eq!(order.subtotal, Clp::new(59_980));
    assert_eq!(order.discount, Clp::zero());
    assert_eq!(order.total, Clp::new(59_980));
    assert!(order.is_consistent());
    assert!(order.id.as_str().starts_with("LUG-20251005-"));
}

#[test]
fn test_affiliate_checkout_totals() {
    let mut shop = shop();
    shop.register(form("Ana", "Ana@DUOC.cl")).unwrap();
    shop.add_to_cart("JM001", 2).unwrap();

    let order = shop.checkout().unwrap();
    assert_eq!(order.discount, Clp::new(11_996));
    assert_eq!(order.total, Clp::new(47_984));
    assert_eq!(order.total, order.subtotal - order.discount);
    assert!(order.user.is_duoc_affiliate);
}

#[test]
fn test_subdomain_counts_as_affiliate() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@alumnos.duocuc.cl")).unwrap();
    shop.add_to_cart("MP001", 1).unwrap();
    let order = shop.checkout().unwrap();
    assert_eq!(order.discount, Clp::new(29_990).percentage(20));
}

#[test]
fn test_checkout_precondition_order() {
    let mut shop = shop();
    // empty cart and nobody signed in
    assert_eq!(shop.checkout().unwrap_err().code(), "NO_USER");

    shop.add_to_cart("JM001", 1).unwrap();
    assert_eq!(shop.checkout().unwrap_err().code(), "NO_USER");

    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.clear_cart().unwrap();
    assert_eq!(shop.checkout().unwrap_err().code(), "EMPTY");
}

#[test]
fn test_underage_cannot_buy() {
    // Turns 18 on the clock's date, so registration succeeds.
    let mut shop = shop();
    shop.register(RegistrationForm {
        birthdate: "2007-10-05".into(),
        ..form("Benja", "benja@gmail.com")
    })
    .unwrap();
    shop.add_to_cart("JM001", 1).unwrap();

    // One day earlier they are 17.
    let mut earlier = shop_over(shop.into_store())
        .with_clock(FixedClock::at_date(2025, 10, 4).unwrap());
    assert_eq!(earlier.checkout().unwrap_err().code(), "UNDERAGE");
    assert_eq!(earlier.cart_count(), 1);
}

#[test]
fn test_cart_is_empty_after_checkout() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 1).unwrap();
    shop.add_to_cart("AC001", 2).unwrap();

    let order = shop.checkout().unwrap();
    assert_eq!(order.item_count(), 3);
    assert!(shop.cart().is_empty());
    assert_eq!(shop.cart_count(), 0);
    // no idempotence
    assert_eq!(shop.checkout().unwrap_err().code(), "EMPTY");
}

#[test]
fn test_stock_limit_leaves_cart_unchanged() {
    let mut shop = shop();
    let err = shop.add_to_cart("CO001", 6).unwrap_err();
    assert_eq!(err.code(), "QUANTITY_EXCEEDS_STOCK");
    assert!(shop.cart().is_empty());

    shop.add_to_cart("CO001", 3).unwrap();
    let err = shop.add_to_cart("CO001", 3).unwrap_err();
    assert_eq!(err.code(), "QUANTITY_EXCEEDS_STOCK");
    assert_eq!(shop.cart().quantity_of("CO001"), 3);

    assert_eq!(shop.add_to_cart("CO001", 2).unwrap(), 5);
    for line in shop.cart().lines() {
        let stock = shop.product(line.code.as_str()).unwrap().stock;
        assert!(line.quantity <= stock);
    }
}

#[test]
fn test_cart_summary_matches_checkout() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@duoc.cl")).unwrap();
    shop.add_to_cart("JM002", 1).unwrap();
    shop.add_to_cart("MS001", 2).unwrap();

    let summary = shop.cart_summary().unwrap();
    let order = shop.checkout().unwrap();
    assert_eq!(summary.subtotal, order.subtotal);
    assert_eq!(summary.discount, order.discount);
    assert_eq!(summary.total, order.total);
}

#[test]
fn test_receipt_lookup() {
    let mut shop = shop();
    assert_eq!(shop.receipt(None).unwrap_err().code(), "ORDER_NOT_FOUND");

    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 1).unwrap();
    let first = shop.checkout().unwrap();
    shop.add_to_cart("AC002", 1).unwrap();
    let second = shop.checkout().unwrap();

    assert_eq!(shop.receipt(Some(first.id.as_str())).unwrap(), first);
    assert_eq!(shop.receipt(None).unwrap(), second);
    // unknown ids fall back to the last order
    assert_eq!(shop.receipt(Some("LUG-19990101-ZZZZ")).unwrap(), second);
}

#[test]
fn test_checkout_events() {
    let mut shop = shop();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    shop.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 2).unwrap();
    let order = shop.checkout().unwrap();

    let seen = seen.borrow();
    assert!(seen.contains(&StoreEvent::CartChanged { item_count: 2 }));
    assert!(seen.contains(&StoreEvent::CartChanged { item_count: 0 }));
    assert_eq!(
        seen.last(),
        Some(&StoreEvent::OrderPlaced { order_id: order.id })
    );
}

#[test]
fn test_checkout_reports_overflow_for_corrupt_cart() {
    let mut store = MemoryStore::new();
    store
        .set(
            "levelup_cart",
            r#"[{"code":"CO001","quantity":1000000000000}]"#.to_string(),
        )
        .unwrap();
    let mut shop = shop_over(store);
    shop.register(form("Ana", "a@duoc.cl")).unwrap();

    assert_eq!(shop.cart_summary().unwrap_err().code(), "OVERFLOW");
    assert_eq!(shop.checkout().unwrap_err().code(), "OVERFLOW");
    assert!(shop.orders().is_empty());
}
