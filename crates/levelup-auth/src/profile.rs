//! Profile edits.

use crate::registration::{check_birthdate, check_phone, normalize_email, AccountRules};
use crate::user::User;
use crate::AuthError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fields a member may change. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `YYYY-MM-DD`.
    pub birthdate: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<String>,
}

impl ProfileUpdate {
    /// Check if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.birthdate.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.preferences.is_none()
    }

    /// Validate every field, then apply them all to `user`.
    ///
    /// Nothing is written if any field is rejected.
    pub fn apply(
        &self,
        user: &mut User,
        email_taken: impl Fn(&str) -> bool,
        rules: &AccountRules,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let name = match &self.name {
            Some(name) if name.trim().is_empty() => return Err(AuthError::MissingField("name")),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        let email = match &self.email {
            Some(email) => {
                let email = normalize_email(email)?;
                if email != user.email && email_taken(&email) {
                    return Err(AuthError::DuplicateEmail(email));
                }
                Some(email)
            }
            None => None,
        };
        let birthdate = self
            .birthdate
            .as_deref()
            .map(|b| check_birthdate(b, today, rules.minimum_age))
            .transpose()?;
        let phone = self.phone.as_deref().map(check_phone).transpose()?;

        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
            user.refresh_affiliate(&rules.discount);
        }
        if let Some(birthdate) = birthdate {
            user.birthdate = Some(birthdate);
        }
        if let Some(phone) = phone {
            user.phone = phone;
        }
        if let Some(address) = &self.address {
            user.address = address.trim().to_string();
        }
        if let Some(preferences) = &self.preferences {
            user.preferences = preferences.trim().to_string();
        }
        user.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::RegistrationForm;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()
    }

    fn user() -> User {
        RegistrationForm {
            name: "Ana".into(),
            email: "ana@gmail.com".into(),
            password: "secreta1".into(),
            birthdate: "2000-05-17".into(),
            ..Default::default()
        }
        .into_user(|_| false, &AccountRules::default(), today(), Utc::now())
        .unwrap()
    }

    #[test]
    fn test_email_change_rederives_affiliate() {
        let mut ana = user();
        let update = ProfileUpdate {
            email: Some("Ana@Duoc.cl".into()),
            address: Some(" Av. Siempre Viva 742 ".into()),
            ..Default::default()
        };
        update
            .apply(&mut ana, |_| false, &AccountRules::default(), today(), Utc::now())
            .unwrap();
        assert_eq!(ana.email, "ana@duoc.cl");
        assert!(ana.is_duoc_affiliate);
        assert_eq!(ana.address, "Av. Siempre Viva 742");
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let mut ana = user();
        let before = ana.clone();
        let update = ProfileUpdate {
            name: Some("Ana María".into()),
            birthdate: Some("2010-01-01".into()),
            ..Default::default()
        };
        let err = update
            .apply(&mut ana, |_| false, &AccountRules::default(), today(), Utc::now())
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_AGE");
        assert_eq!(ana, before);
    }

    #[test]
    fn test_blank_name_and_duplicate_email() {
        let mut ana = user();
        let blank = ProfileUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        let err = blank
            .apply(&mut ana, |_| false, &AccountRules::default(), today(), Utc::now())
            .unwrap_err();
        assert_eq!(err, AuthError::MissingField("name"));

        let taken = ProfileUpdate {
            email: Some("otro@gmail.com".into()),
            ..Default::default()
        };
        let err = taken
            .apply(&mut ana, |_| true, &AccountRules::default(), today(), Utc::now())
            .unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_EMAIL");
    }

    #[test]
    fn test_keeping_own_email_is_not_duplicate() {
        let mut ana = user();
        let same = ProfileUpdate {
            email: Some("ANA@gmail.com".into()),
            ..Default::default()
        };
        same.apply(&mut ana, |_| true, &AccountRules::default(), today(), Utc::now())
            .unwrap();
        assert_eq!(ana.email, "ana@gmail.com");
        assert!(ProfileUpdate::default().is_empty());
    }
}
