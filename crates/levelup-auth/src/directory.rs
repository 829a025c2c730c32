//! The registered user list.

use crate::profile::ProfileUpdate;
use crate::registration::{AccountRules, RegistrationForm};
use crate::user::User;
use crate::AuthError;
use chrono::{DateTime, NaiveDate, Utc};
use levelup_commerce::ids::UserId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// All registered users. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored users.
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Mutable access for bulk updates such as point refreshes.
    pub fn users_mut(&mut self) -> &mut [User] {
        &mut self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Find a user by id.
    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Find a user by email, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_email(email))
    }

    /// Check if an email is registered, ignoring case.
    pub fn email_taken(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Validate a registration and add the new user.
    pub fn register(
        &mut self,
        form: RegistrationForm,
        rules: &AccountRules,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<&User, AuthError> {
        let user = form.into_user(|email| self.email_taken(email), rules, today, now)?;
        info!(user_id = %user.id, affiliate = user.is_duoc_affiliate, "Registered user");
        self.users.push(user);
        self.users.last().ok_or(AuthError::NoUser)
    }

    /// Check credentials: email ignoring case, password exactly.
    ///
    /// Imported records without a password can never sign in.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&User, AuthError> {
        let user = self
            .users
            .iter()
            .find(|u| u.has_email(email) && !u.password.is_empty() && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        debug!(user_id = %user.id, "Credentials accepted");
        Ok(user)
    }

    /// Apply a profile update to a user.
    pub fn update_profile(
        &mut self,
        id: &UserId,
        update: &ProfileUpdate,
        rules: &AccountRules,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<&User, AuthError> {
        let index = self
            .users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| AuthError::UserNotFound(id.to_string()))?;

        let others = &self.users;
        let email_taken =
            |email: &str| others.iter().any(|u| &u.id != id && u.has_email(email));
        let mut user = self.users[index].clone();
        update.apply(&mut user, email_taken, rules, today, now)?;

        self.users[index] = user;
        Ok(&self.users[index])
    }

    /// Remove a user. Returns the removed record.
    pub fn remove(&mut self, id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|u| &u.id == id)?;
        Some(self.users.remove(index))
    }
}
