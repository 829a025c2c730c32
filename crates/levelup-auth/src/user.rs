//! User records.

use chrono::{DateTime, NaiveDate, Utc};
use levelup_commerce::calendar::age_on;
use levelup_commerce::cart::AffiliateDiscount;
use levelup_commerce::checkout::Purchaser;
use levelup_commerce::ids::{ReferralCode, UserId};
use serde::{Deserialize, Deserializer, Serialize};

/// A registered shop member.
///
/// Older stored records used Spanish or camelCase field names; the aliases
/// let them load into this shape unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// User ID.
    #[serde(default = "UserId::generate")]
    pub id: UserId,
    /// Display name.
    #[serde(default, alias = "nombre")]
    pub name: String,
    /// Surname, only on records that stored it separately.
    #[serde(default, alias = "apellido", skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Email address, lowercase.
    pub email: String,
    /// Password, stored as entered.
    #[serde(default)]
    pub password: String,
    /// Date of birth. Only legacy records may lack it.
    #[serde(
        default,
        alias = "fechaNacimiento",
        deserialize_with = "deserialize_birthdate"
    )]
    pub birthdate: Option<NaiveDate>,
    /// Whether the email is on an affiliate domain.
    #[serde(default, alias = "isDuoc")]
    pub is_duoc_affiliate: bool,
    /// Discount fraction, 0 or the affiliate rate.
    #[serde(default, alias = "discount")]
    pub discount_rate: f64,
    /// Code this member hands out to friends.
    #[serde(default = "ReferralCode::generate", alias = "refCode")]
    pub referral_code: ReferralCode,
    /// Code entered at registration, if any.
    #[serde(
        default,
        alias = "referredBy",
        deserialize_with = "deserialize_referral"
    )]
    pub referred_by: Option<ReferralCode>,
    /// Cached loyalty points; recomputed after every checkout.
    #[serde(default)]
    pub points: i64,
    /// Shipping address.
    #[serde(default, alias = "direccion")]
    pub address: String,
    /// Mobile phone.
    #[serde(default, alias = "telefono")]
    pub phone: String,
    /// Free-form gaming preferences.
    #[serde(default, alias = "preferencias")]
    pub preferences: String,
    /// Registration time.
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last profile change.
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Age in whole years on `today`, if the birthdate is known.
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        self.birthdate.map(|b| age_on(b, today))
    }

    /// Check if the user has reached `minimum_age` on `today`.
    pub fn is_adult(&self, today: NaiveDate, minimum_age: u32) -> bool {
        self.age(today).is_some_and(|a| a >= minimum_age)
    }

    /// Case-insensitive email comparison.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }

    /// Name and surname joined for display.
    pub fn display_name(&self) -> String {
        match self.surname.as_deref().map(str::trim) {
            Some(surname) if !surname.is_empty() => format!("{} {}", self.name, surname),
            _ => self.name.clone(),
        }
    }

    /// Re-derive the affiliate flag and discount rate from the email.
    pub fn refresh_affiliate(&mut self, policy: &AffiliateDiscount) {
        self.is_duoc_affiliate = policy.is_affiliate(&self.email);
        self.discount_rate = policy.rate_for(&self.email);
    }

    /// Checkout view of this user.
    pub fn purchaser(&self) -> Purchaser<'_> {
        Purchaser {
            name: &self.name,
            email: &self.email,
            birthdate: self.birthdate,
            referred_by: self.referred_by.as_ref(),
        }
    }
}

/// Parse a birthdate as typed in a form or stored by older versions.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
pub fn parse_birthdate(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let date_part = input.get(..10).unwrap_or(input);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn deserialize_birthdate<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_birthdate))
}

fn deserialize_referral<'de, D>(deserializer: D) -> Result<Option<ReferralCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(ReferralCode::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_birthdate() {
        assert_eq!(parse_birthdate("2000-05-17"), Some(date(2000, 5, 17)));
        assert_eq!(
            parse_birthdate("2000-05-17T00:00:00.000Z"),
            Some(date(2000, 5, 17))
        );
        assert_eq!(parse_birthdate(""), None);
        assert_eq!(parse_birthdate("17/05/2000"), None);
    }

    #[test]
    fn test_legacy_record_loads() {
        let json = r#"{
            "nombre": "Ana",
            "apellido": "Rojas",
            "email": "ana@duoc.cl",
            "password": "secreta1",
            "fechaNacimiento": "",
            "isDuoc": true,
            "discount": 0.2,
            "referredBy": "lug-ab12",
            "level": "Bronze"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.id.as_str().starts_with("u_"));
        assert_eq!(user.display_name(), "Ana Rojas");
        assert_eq!(user.birthdate, None);
        assert!(user.is_duoc_affiliate);
        assert_eq!(user.referred_by, Some(ReferralCode::new("LUG-AB12")));
        assert!(user.referral_code.as_str().starts_with("LUG-"));
    }

    #[test]
    fn test_age_and_affiliate() {
        let mut user: User = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@gmail.com","birthdate":"2007-10-18"}"#,
        )
        .unwrap();
        assert_eq!(user.age(date(2025, 10, 17)), Some(17));
        assert!(!user.is_adult(date(2025, 10, 17), 18));
        assert!(user.is_adult(date(2025, 10, 18), 18));

        user.email = "ana@duocuc.cl".into();
        user.refresh_affiliate(&AffiliateDiscount::default());
        assert!(user.is_duoc_affiliate);
        assert_eq!(user.discount_rate, 0.2);
        assert!(user.has_email(" ANA@duocuc.cl"));
    }

    #[test]
    fn test_birthdate_round_trips_as_iso() {
        let user: User = serde_json::from_str(
            r#"{"name":"Ana","email":"ana@gmail.com","birthdate":"1999-01-31"}"#,
        )
        .unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["birthdate"], "1999-01-31");
        assert!(value.get("surname").is_none());
    }
}
