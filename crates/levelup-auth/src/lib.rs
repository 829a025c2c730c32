//! Member accounts for the Level-Up storefront.
//!
//! Registration, login, profile edits and the session pointer. Credentials
//! are compared as stored; there is no security model here.

mod directory;
mod error;
mod profile;
mod registration;
mod session;
mod user;

pub use directory::UserDirectory;
pub use error::AuthError;
pub use profile::ProfileUpdate;
pub use registration::{
    check_birthdate, check_phone, normalize_email, AccountRules, RegistrationForm,
};
pub use session::{current_user, AuthSession};
pub use user::{parse_birthdate, User};
