//! Registration form validation.

use crate::user::{parse_birthdate, User};
use crate::AuthError;
use chrono::{DateTime, NaiveDate, Utc};
use levelup_commerce::calendar::age_on;
use levelup_commerce::cart::AffiliateDiscount;
use levelup_commerce::checkout::DEFAULT_MINIMUM_AGE;
use levelup_commerce::ids::{ReferralCode, UserId};
use serde::{Deserialize, Serialize};

/// Rules applied to new and edited accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRules {
    /// Minimum age to register.
    pub minimum_age: u32,
    /// Affiliate discount policy, used to derive the affiliate flag.
    pub discount: AffiliateDiscount,
}

impl Default for AccountRules {
    fn default() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
            discount: AffiliateDiscount::default(),
        }
    }
}

/// Data entered on the registration page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Repeated password; checked only when present.
    pub password_confirmation: Option<String>,
    /// `YYYY-MM-DD`.
    pub birthdate: String,
    pub address: String,
    pub phone: String,
    pub preferences: String,
    /// A friend's referral code.
    pub referral_code: Option<String>,
}

/// Normalize and validate an email address.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace) =>
        {
            Ok(email)
        }
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

/// Parse a birthdate and check it against the minimum age.
pub fn check_birthdate(
    input: &str,
    today: NaiveDate,
    minimum_age: u32,
) -> Result<NaiveDate, AuthError> {
    let birthdate =
        parse_birthdate(input).ok_or_else(|| AuthError::InvalidBirthdate(input.trim().to_string()))?;
    let age = age_on(birthdate, today);
    if age < minimum_age {
        return Err(AuthError::InvalidAge {
            age,
            minimum: minimum_age,
        });
    }
    Ok(birthdate)
}

/// Check a phone number. Empty is allowed; otherwise 9 digits starting with 9.
pub fn check_phone(phone: &str) -> Result<String, AuthError> {
    let phone = phone.trim();
    let valid = phone.is_empty()
        || (phone.len() == 9 && phone.starts_with('9') && phone.chars().all(|c| c.is_ascii_digit()));
    if valid {
        Ok(phone.to_string())
    } else {
        Err(AuthError::InvalidPhone(phone.to_string()))
    }
}

impl RegistrationForm {
    /// Validate the form and build the new user.
    ///
    /// `email_taken` answers whether a (normalized) email is already
    /// registered. Checks run in a fixed order: required fields, password
    /// confirmation, email shape, email uniqueness, age.
    pub fn into_user(
        self,
        email_taken: impl Fn(&str) -> bool,
        rules: &AccountRules,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("birthdate", &self.birthdate),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AuthError::MissingField(*field));
        }
        if let Some(confirmation) = &self.password_confirmation {
            if *confirmation != self.password {
                return Err(AuthError::PasswordMismatch);
            }
        }

        let email = normalize_email(&self.email)?;
        if email_taken(&email) {
            return Err(AuthError::DuplicateEmail(email));
        }
        let birthdate = check_birthdate(&self.birthdate, today, rules.minimum_age)?;
        let phone = check_phone(&self.phone)?;

        let mut user = User {
            id: UserId::generate(),
            name: self.name.trim().to_string(),
            surname: None,
            email,
            password: self.password,
            birthdate: Some(birthdate),
            is_duoc_affiliate: false,
            discount_rate: 0.0,
            referral_code: ReferralCode::generate(),
            referred_by: self.referral_code.as_deref().and_then(ReferralCode::parse),
            points: 0,
            address: self.address.trim().to_string(),
            phone,
            preferences: self.preferences.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        user.refresh_affiliate(&rules.discount);
        Ok(user)
    }
}
