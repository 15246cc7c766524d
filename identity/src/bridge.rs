//! Session bridge: turns service auth events into published `AuthState`.
//!
//! ARCHITECTURE
//! ============
//! The bridge is the only writer of the `watch` channel the store reads from.
//! It multiplexes three inputs in one loop:
//!
//! - the service's auth-event subscription,
//! - in-flight profile fetches (`FuturesUnordered`),
//! - commands from store handles (profile replacement after an update).
//!
//! Every fetch is tagged with a generation. A newer sign-in, a sign-out or a
//! profile replacement bumps the generation, and results carrying an older
//! one are dropped on arrival, so a slow response can never overwrite a newer
//! decision.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod tests;

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{mpsc, oneshot, watch};

use crate::error::ServiceError;
use crate::profile::User;
use crate::service::{AuthEvent, IdentityService};
use crate::state::AuthState;

/// Requests from store handles to the bridge.
#[derive(Debug)]
pub(crate) enum BridgeCommand {
    /// Server returned a fresh row for the signed-in user.
    ReplaceUser { user: User, ack: oneshot::Sender<()> },
}

type FetchOutcome = (u64, Result<User, ServiceError>);

/// Long-running task that owns `AuthState` writes.
///
/// Obtain one from [`AuthStore::new`](crate::store::AuthStore::new) and drive
/// [`SessionBridge::run`] on the local executor.
pub struct SessionBridge {
    service: Rc<dyn IdentityService>,
    state: watch::Sender<AuthState>,
    commands: mpsc::UnboundedReceiver<BridgeCommand>,
    generation: u64,
    /// User id of the fetch that will be accepted next, if one is in flight.
    pending_user: Option<String>,
}

impl SessionBridge {
    pub(crate) fn new(
        service: Rc<dyn IdentityService>,
        state: watch::Sender<AuthState>,
        commands: mpsc::UnboundedReceiver<BridgeCommand>,
    ) -> Self {
        Self { service, state, commands, generation: 0, pending_user: None }
    }

    /// Resolve the initial session, then follow auth events until every store
    /// handle is dropped or the service closes its event stream.
    pub async fn run(mut self) {
        // Subscribe before asking for the session so nothing emitted in between is missed.
        let mut events = self.service.on_auth_state_change();
        let mut fetches: FuturesUnordered<LocalBoxFuture<'static, FetchOutcome>> = FuturesUnordered::new();

        match self.service.get_session().await {
            Ok(Some(session)) => fetches.push(self.fetch(session.user.id)),
            Ok(None) => self.publish(AuthState::signed_out()),
            Err(e) => {
                tracing::warn!(error = %e, "initial session lookup failed; treating as signed out");
                self.publish(AuthState::signed_out());
            }
        }

        loop {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else {
                        tracing::debug!("auth event stream closed");
                        break;
                    };
                    match event {
                        AuthEvent::SignedIn(session) => {
                            tracing::debug!(user_id = %session.user.id, "signed in; fetching profile");
                            fetches.push(self.fetch(session.user.id));
                        }
                        AuthEvent::SignedOut => {
                            self.supersede();
                            self.publish(AuthState::signed_out());
                        }
                    }
                }
                Some((generation, result)) = fetches.next(), if !fetches.is_empty() => {
                    self.settle(generation, result);
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!("all auth store handles dropped");
                        break;
                    };
                    self.apply(command);
                }
            }
        }
    }

    fn supersede(&mut self) {
        self.generation += 1;
        self.pending_user = None;
    }

    fn fetch(&mut self, user_id: String) -> LocalBoxFuture<'static, FetchOutcome> {
        self.supersede();
        self.pending_user = Some(user_id.clone());
        let generation = self.generation;
        let service = Rc::clone(&self.service);
        async move {
            let result = service.select_profile(&user_id).await.map(User::from);
            (generation, result)
        }
        .boxed_local()
    }

    fn settle(&mut self, generation: u64, result: Result<User, ServiceError>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale profile fetch");
            return;
        }
        self.pending_user = None;
        match result {
            Ok(user) => self.publish(AuthState::signed_in(user)),
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed; treating as signed out");
                self.publish(AuthState::signed_out());
            }
        }
    }

    fn apply(&mut self, command: BridgeCommand) {
        match command {
            BridgeCommand::ReplaceUser { user, ack } => {
                let signed_in_as_same = self
                    .state
                    .borrow()
                    .user()
                    .is_some_and(|current| current.user_id() == user.user_id());
                let superseded = self
                    .pending_user
                    .as_deref()
                    .is_some_and(|pending| pending != user.user_id());

                if signed_in_as_same && !superseded {
                    self.supersede();
                    self.publish(AuthState::signed_in(user));
                } else {
                    tracing::debug!(user_id = %user.user_id(), "dropping profile replacement for inactive user");
                }
                if ack.send(()).is_err() {
                    tracing::trace!("profile update caller went away before ack");
                }
            }
        }
    }

    fn publish(&self, next: AuthState) {
        let authenticated = next.is_authenticated();
        let role = next.role();
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            tracing::info!(authenticated, role = ?role, "auth state updated");
        }
    }
}
