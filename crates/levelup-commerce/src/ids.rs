//! Newtype IDs for type-safe identifiers.
//!
//! Product codes, user ids, order ids and referral codes are all strings on
//! disk; the newtypes keep them from being mixed up in signatures.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string without validation.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Catalog product code, e.g. `JM001`.
    ProductCode
);
define_id!(
    /// Registered user id, `u_` followed by 8 base36 characters.
    UserId
);
define_id!(
    /// Order id, `LUG-YYYYMMDD-XXXX`.
    OrderId
);
define_id!(
    /// Referral code handed out at registration, `LUG-XXXX`.
    ReferralCode
);

impl UserId {
    /// Generate a fresh user id.
    pub fn generate() -> Self {
        Self(format!("u_{}", random_base36(8)))
    }
}

impl OrderId {
    /// Generate an order id for an order placed on `date`.
    ///
    /// Uniqueness is probabilistic: four random characters per day.
    pub fn generate(date: NaiveDate) -> Self {
        Self(format!(
            "LUG-{}-{}",
            date.format("%Y%m%d"),
            random_base36(4).to_uppercase()
        ))
    }
}

impl ReferralCode {
    /// Generate a fresh referral code.
    pub fn generate() -> Self {
        Self(format!("LUG-{}", random_base36(4).to_uppercase()))
    }

    /// Parse a code typed by a user.
    ///
    /// Accepts `LUG-` plus four word characters in any case and returns the
    /// uppercase form. Anything else yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_uppercase();
        let suffix = code.strip_prefix("LUG-")?;
        let well_formed = suffix.len() == 4
            && suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        well_formed.then_some(Self(code))
    }
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
