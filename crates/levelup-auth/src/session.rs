//! Session management.
//!
//! A session is just a pointer to the signed-in user's id. The user record
//! itself always comes from the directory, so profile edits are visible
//! immediately.

use crate::directory::UserDirectory;
use crate::user::User;
use crate::AuthError;
use levelup_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// The current sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthSession {
    /// Signed-in user.
    pub user_id: UserId,
}

impl AuthSession {
    /// Start a session for a user.
    pub fn start(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
        }
    }

    /// Resolve the session's user. A session pointing at a deleted user
    /// resolves to nothing.
    pub fn user<'a>(&self, directory: &'a UserDirectory) -> Option<&'a User> {
        directory.find(&self.user_id)
    }

    /// Resolve the session's user or fail with `NoUser`.
    pub fn require<'a>(&self, directory: &'a UserDirectory) -> Result<&'a User, AuthError> {
        self.user(directory).ok_or(AuthError::NoUser)
    }
}

/// Resolve an optional session to a user.
pub fn current_user<'a>(
    session: Option<&AuthSession>,
    directory: &'a UserDirectory,
) -> Option<&'a User> {
    session.and_then(|s| s.user(directory))
}
