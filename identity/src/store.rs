//! Auth store: the read side of `AuthState` plus the account operations.
//!
//! Operations talk to the service directly but never write state themselves.
//! Sign-in and sign-out land through the bridge's event handling; a profile
//! update hands the server's row to the bridge and waits for the ack, so the
//! published state already reflects the update when `update_profile` returns.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::rc::Rc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::bridge::{BridgeCommand, SessionBridge};
use crate::error::AuthError;
use crate::profile::{ProfilePatch, User};
use crate::service::IdentityService;
use crate::signup::SignupData;
use crate::state::AuthState;

/// How a successful signup left the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    /// A session started; the sign-in event publishes the user.
    SignedIn,
    /// The service holds the account until the email address is confirmed.
    /// Nobody is signed in.
    ConfirmationPending,
}

/// Cheap, clonable handle to the shared auth state.
#[derive(Clone)]
pub struct AuthStore {
    service: Rc<dyn IdentityService>,
    state: watch::Receiver<AuthState>,
    commands: mpsc::UnboundedSender<BridgeCommand>,
}

impl AuthStore {
    /// Build a store and the bridge that feeds it. State starts as loading
    /// and stays there until the returned bridge is running.
    #[must_use]
    pub fn new(service: Rc<dyn IdentityService>) -> (Self, SessionBridge) {
        let (state_tx, state_rx) = watch::channel(AuthState::loading());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let bridge = SessionBridge::new(Rc::clone(&service), state_tx, command_rx);
        (Self { service, state: state_rx, commands: command_tx }, bridge)
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `pred`.
    ///
    /// Returns `None` if the bridge has stopped without ever satisfying it.
    pub async fn wait_for(&self, mut pred: impl FnMut(&AuthState) -> bool) -> Option<AuthState> {
        let mut rx = self.state.clone();
        match rx.wait_for(|state| pred(state)).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.service
            .sign_in_with_password(email, password)
            .await
            .map(|session| tracing::info!(user_id = %session.user.id, "login succeeded"))
            .map_err(|e| {
                let err = AuthError::from_service("Login", e);
                tracing::warn!(code = err.error_code(), error = %err, "login failed");
                err
            })
    }

    /// Create the identity, then write its role profile.
    ///
    /// A failed profile write signs the new identity out again and reports
    /// the write's own message. A write that matches no row (the account is
    /// not confirmed yet) is not a failure.
    pub async fn signup(&self, data: &SignupData) -> Result<SignupOutcome, AuthError> {
        let identity = self
            .service
            .sign_up(data.email(), data.password())
            .await
            .map_err(|e| AuthError::from_service("Signup", e))?;
        tracing::info!(user_id = %identity.id, role = %data.role(), "identity created");

        let patch = data.profile_patch();
        let write_error = match self.service.write_profile(&identity.id, &patch).await {
            Ok(()) if identity.session_started => return Ok(SignupOutcome::SignedIn),
            Ok(()) => {
                tracing::info!(user_id = %identity.id, "signup awaiting email confirmation");
                return Ok(SignupOutcome::ConfirmationPending);
            }
            Err(e) => e,
        };
        tracing::warn!(user_id = %identity.id, error = %write_error, "profile write failed; signing out");

        if let Err(e) = self.service.sign_out().await {
            tracing::error!(
                user_id = %identity.id,
                error = %e,
                "compensating sign-out failed; identity left without a profile"
            );
        }
        let message = write_error
            .message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Signup failed: Unknown error occurred".to_owned());
        Err(AuthError::ProfileWrite(message))
    }

    /// Ask the service to end the session. Never fails; local state follows
    /// the sign-out event.
    pub async fn logout(&self) {
        if let Err(e) = self.service.sign_out().await {
            tracing::warn!(error = %e, "logout failed");
        }
    }

    /// Write `patch` to the signed-in user's profile and publish the row the
    /// server returns.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<User, AuthError> {
        let Some(user_id) = self.state.borrow().user().map(|u| u.user_id().to_owned()) else {
            return Err(AuthError::NotAuthenticated);
        };

        let row = self
            .service
            .update_profile(&user_id, patch)
            .await
            .map_err(|e| AuthError::from_service("Profile update", e))?;
        let user = User::from(row);

        let (ack_tx, ack_rx) = oneshot::channel();
        let command = BridgeCommand::ReplaceUser { user: user.clone(), ack: ack_tx };
        if self.commands.send(command).is_err() || ack_rx.await.is_err() {
            tracing::warn!(user_id = %user_id, "session bridge not running; profile update not published");
        }
        Ok(user)
    }
}
