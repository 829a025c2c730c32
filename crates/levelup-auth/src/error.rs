//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// A required registration field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Email is not of the form `local@domain`.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Email already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Birthdate could not be parsed.
    #[error("invalid birthdate: {0}")]
    InvalidBirthdate(String),

    /// Registrant below the minimum age.
    #[error("must be at least {minimum} years old (age {age})")]
    InvalidAge { age: u32, minimum: u32 },

    /// Phone number not in the local mobile format.
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session is active.
    #[error("no user is signed in")]
    NoUser,

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(String),
}

impl AuthError {
    /// Stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingField(_) => "MISSING_FIELD",
            AuthError::PasswordMismatch => "PASSWORD_MISMATCH",
            AuthError::InvalidEmail(_) => "INVALID_EMAIL",
            AuthError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            AuthError::InvalidBirthdate(_) | AuthError::InvalidAge { .. } => "INVALID_AGE",
            AuthError::InvalidPhone(_) => "INVALID_PHONE",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::NoUser | AuthError::UserNotFound(_) => "NO_USER",
        }
    }

    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials | AuthError::NoUser)
    }

    /// Check if this is a form validation failure.
    pub fn is_validation_error(&self) -> bool {
        !self.is_auth_failure() && !matches!(self, AuthError::UserNotFound(_))
    }
}
