mod common;

use common::{form, shop};
use levelup_auth::{ProfileUpdate, RegistrationForm};
use levelup_commerce::loyalty::Tier;
use levelup_commerce::Clp;

#[test]
fn test_seventeen_year_old_cannot_register() {
    let mut shop = shop();
    let err = shop
        .register(RegistrationForm {
            birthdate: "2008-10-05".into(),
            ..form("Benja", "benja@gmail.com")
        })
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_AGE");
    assert!(shop.users().is_empty());
    assert!(shop.current_user().is_none());
}

#[test]
fn test_registration_errors() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@gmail.com")).unwrap();

    let cases = [
        (RegistrationForm { name: " ".into(), ..form("", "x@gmail.com") }, "MISSING_FIELD"),
        (
            RegistrationForm {
                password_confirmation: Some("otra".into()),
                ..form("Beto", "beto@gmail.com")
            },
            "PASSWORD_MISMATCH",
        ),
        (form("Beto", "beto.gmail.com"), "INVALID_EMAIL"),
        (form("Otra Ana", " ANA@gmail.com "), "DUPLICATE_EMAIL"),
    ];
    for (form, code) in cases {
        assert_eq!(shop.register(form).unwrap_err().code(), code);
    }
    assert_eq!(shop.users().len(), 1);
}

#[test]
fn test_register_normalizes() {
    let mut shop = shop();
    let user = shop.register(form("  Ana Rojas ", " Ana@Duoc.CL ")).unwrap();
    assert_eq!(user.name, "Ana Rojas");
    assert_eq!(user.email, "ana@duoc.cl");
    assert!(user.is_duoc_affiliate);
    assert!((user.discount_rate - 0.2).abs() < f64::EPSILON);
    assert!(user.id.as_str().starts_with("u_"));
    assert!(user.referral_code.as_str().starts_with("LUG-"));
}

#[test]
fn test_referral_points_flow() {
    let mut shop = shop();
    let ana = shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 2).unwrap();
    shop.checkout().unwrap();
    shop.logout().unwrap();

    let beto = shop
        .register(RegistrationForm {
            referral_code: Some(ana.referral_code.as_str().to_lowercase()),
            ..form("Beto", "beto@gmail.com")
        })
        .unwrap();
    assert_eq!(beto.referred_by.as_ref(), Some(&ana.referral_code));
    assert_eq!(
        shop.referral_counts().get(ana.referral_code.as_str()),
        Some(&1)
    );

    shop.add_to_cart("MP001", 1).unwrap();
    let order = shop.checkout().unwrap();
    assert_eq!(order.referral.as_ref(), Some(&ana.referral_code));

    // cached points are refreshed for the referrer too
    let users = shop.users();
    assert_eq!(users.find_by_email("ana@gmail.com").unwrap().points, 700);
    assert_eq!(users.find_by_email("beto@gmail.com").unwrap().points, 200);

    shop.logout().unwrap();
    shop.login("ana@gmail.com", "secreta1", false).unwrap();
    let stats = shop.profile_stats().unwrap();
    assert_eq!(stats.points.purchase, 500);
    assert_eq!(stats.points.referral, 200);
    assert_eq!(stats.tier, Tier::Gold);
    assert_eq!(stats.points_to_next_tier, Some(300));
    assert_eq!(stats.purchase_count, 1);
    assert_eq!(stats.total_spent, Clp::new(59_980));
    assert_eq!(stats.referral_registrations, 1);
}

#[test]
fn test_malformed_referral_is_ignored() {
    let mut shop = shop();
    let user = shop
        .register(RegistrationForm {
            referral_code: Some("AMIGO".into()),
            ..form("Ana", "ana@gmail.com")
        })
        .unwrap();
    assert!(user.referred_by.is_none());
    assert!(shop.referral_counts().is_empty());
}

#[test]
fn test_order_history_newest_first() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@duoc.cl")).unwrap();
    shop.add_to_cart("JM001", 1).unwrap();
    shop.checkout().unwrap();
    shop.add_to_cart("JM002", 1).unwrap();
    shop.checkout().unwrap();
    shop.logout().unwrap();
    shop.register(form("Beto", "beto@gmail.com")).unwrap();
    shop.add_to_cart("AC001", 1).unwrap();
    shop.checkout().unwrap();

    assert_eq!(shop.order_history().unwrap().len(), 1);

    shop.login("ana@duoc.cl", "secreta1", false).unwrap();
    let history = shop.order_history().unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].timestamp >= history[1].timestamp);
    let stats = shop.profile_stats().unwrap();
    assert_eq!(stats.savings, history.iter().map(|o| o.discount).sum());
}

#[test]
fn test_update_profile() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.logout().unwrap();
    shop.register(form("Beto", "beto@gmail.com")).unwrap();

    let err = shop
        .update_profile(&ProfileUpdate {
            email: Some("ANA@gmail.com".into()),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_EMAIL");

    let err = shop
        .update_profile(&ProfileUpdate {
            name: Some("  ".into()),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_FIELD");

    let updated = shop
        .update_profile(&ProfileUpdate {
            email: Some("beto@duocuc.cl".into()),
            address: Some("Av. Siempre Viva 742".into()),
            ..Default::default()
        })
        .unwrap();
    assert!(updated.is_duoc_affiliate);
    assert_eq!(shop.current_user().unwrap().address, "Av. Siempre Viva 742");

    // the session follows the id, not the email
    shop.logout().unwrap();
    shop.login("beto@duocuc.cl", "secreta1", false).unwrap();
}

#[test]
fn test_delete_account() {
    let mut shop = shop();
    shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 1).unwrap();

    let removed = shop.delete_account().unwrap();
    assert_eq!(removed.email, "ana@gmail.com");
    assert!(shop.current_user().is_none());
    assert!(shop.cart().is_empty());
    assert!(shop.users().is_empty());
    assert_eq!(
        shop.login("ana@gmail.com", "secreta1", false).unwrap_err().code(),
        "INVALID_CREDENTIALS"
    );
}

#[test]
fn test_reviews() {
    let mut shop = shop();
    assert_eq!(
        shop.add_review("NOPE", "Ana", 5, "Bueno").unwrap_err().code(),
        "PRODUCT_NOT_FOUND"
    );
    assert_eq!(
        shop.add_review("JM001", "Ana", 6, "Bueno").unwrap_err().code(),
        "INVALID_REVIEW"
    );
    assert_eq!(
        shop.add_review("JM001", " ", 4, "Bueno").unwrap_err().code(),
        "INVALID_REVIEW"
    );

    shop.add_review("JM001", "Ana", 5, "Excelente").unwrap();
    shop.add_review("JM001", "Beto", 3, "Correcto").unwrap();
    let reviews = shop.reviews("JM001");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].name, "Beto");
    assert!(shop.reviews("JM002").is_empty());
}

#[test]
fn test_community_report() {
    let mut shop = shop();
    let ana = shop.register(form("Ana", "ana@gmail.com")).unwrap();
    shop.add_to_cart("JM001", 2).unwrap();
    shop.checkout().unwrap();
    shop.logout().unwrap();
    shop.register(RegistrationForm {
        referral_code: Some(ana.referral_code.to_string()),
        ..form("Beto", "beto@gmail.com")
    })
    .unwrap();
    shop.add_to_cart("MP001", 1).unwrap();
    shop.checkout().unwrap();

    let report = shop.community_report();
    assert_eq!(report.orders_total, Clp::new(89_970));
    assert_eq!(report.community_fund, Clp::new(1_799));
    assert_eq!(report.points_distributed, 900);
    assert_eq!(report.supported_events, 4);
    assert_eq!(report.upcoming.len(), 4);
}
