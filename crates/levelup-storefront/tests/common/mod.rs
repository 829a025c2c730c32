#![allow(dead_code)]

use levelup_auth::RegistrationForm;
use levelup_cache::{KvStore, MemoryStore};
use levelup_commerce::calendar::FixedClock;
use levelup_storefront::{StoreRules, Storefront};

pub fn clock() -> FixedClock {
    FixedClock::at_date(2025, 10, 5).unwrap()
}

pub fn shop() -> Storefront<MemoryStore> {
    shop_over(MemoryStore::new())
}

pub fn shop_over<S: KvStore>(store: S) -> Storefront<S> {
    Storefront::open(store, StoreRules::default())
        .unwrap()
        .with_clock(clock())
}

pub fn form(name: &str, email: &str) -> RegistrationForm {
    RegistrationForm {
        name: name.into(),
        email: email.into(),
        password: "secreta1".into(),
        password_confirmation: Some("secreta1".into()),
        birthdate: "1999-04-12".into(),
        ..Default::default()
    }
}
