//! Published auth snapshot.
//!
//! The fields are private and the only constructors are the three legal
//! states, so `is_authenticated() == user().is_some()` and "loading implies no
//! user" hold for every value of this type.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use crate::profile::{Role, User};

#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    user: Option<User>,
    is_loading: bool,
}

impl AuthState {
    /// Session not resolved yet. The process starts here.
    #[must_use]
    pub fn loading() -> Self {
        Self { user: None, is_loading: true }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { user: None, is_loading: false }
    }

    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), is_loading: false }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::loading()
    }
}
