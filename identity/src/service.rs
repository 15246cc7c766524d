//! Contract with the hosted identity + profile service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store and bridge only ever talk to `dyn IdentityService`. The HTTP
//! implementation lives in `supabase`; tests substitute an in-memory fake.
//!
//! Futures are `?Send`: the same trait objects run inside the browser's
//! single-threaded executor and inside a `LocalSet` natively.

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::ServiceError;
use crate::profile::{ProfilePatch, ProfileRow};

/// Capacity of the auth-event broadcast ring.
pub const AUTH_EVENT_CAPACITY: usize = 16;

/// Identity attached to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Proof of authentication issued by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds; `None` when the service did not say.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    /// `true` once `now` (unix seconds) has reached the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Identity returned by signup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedIdentity {
    pub id: String,
    pub email: Option<String>,
    /// `false` when the service holds the account until the email address is
    /// confirmed; no session exists yet and writes go out as the anon role.
    pub session_started: bool,
}

/// Session lifecycle notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

/// Live registration on the service's auth-event stream.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<AuthEvent>,
}

impl Subscription {
    #[must_use]
    pub fn new(rx: broadcast::Receiver<AuthEvent>) -> Self {
        Self { rx }
    }

    /// Next event, or `None` once the service side has gone away.
    ///
    /// If this subscriber fell behind, skipped events are logged and the
    /// stream resumes at the oldest retained event.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "auth event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Hosted authentication and profile-table operations.
#[async_trait::async_trait(?Send)]
pub trait IdentityService {
    /// Exchange credentials for a session. Emits [`AuthEvent::SignedIn`] on success.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ServiceError>;

    /// Create an identity. May also establish a session (and emit `SignedIn`)
    /// when the service auto-confirms accounts.
    async fn sign_up(&self, email: &str, password: &str) -> Result<CreatedIdentity, ServiceError>;

    /// End the current session. Emits [`AuthEvent::SignedOut`].
    async fn sign_out(&self) -> Result<(), ServiceError>;

    /// Current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, ServiceError>;

    /// Register for session lifecycle events.
    fn on_auth_state_change(&self) -> Subscription;

    /// Fetch the profile row keyed by `user_id`.
    async fn select_profile(&self, user_id: &str) -> Result<ProfileRow, ServiceError>;

    /// Apply `patch` to the row keyed by `user_id`, returning the stored row.
    async fn update_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<ProfileRow, ServiceError>;

    /// Apply `patch` to the row keyed by `user_id` without reading it back.
    ///
    /// Matching no row is not an error: before the account is confirmed the
    /// row is invisible to the caller.
    async fn write_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), ServiceError>;
}
