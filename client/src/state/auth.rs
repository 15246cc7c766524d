//! Auth context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once by `App`. Pages read `state()` for rendering and guards, and
//! call account operations through `store()`. The signal is a mirror of the
//! store's published state; nothing in the UI writes it directly.

use std::rc::Rc;

use identity::{AuthState, AuthStore};
use leptos::prelude::*;

/// Shown when the auth service could not be reached or configured.
pub const SERVICE_UNAVAILABLE: &str = "Sign-in is unavailable right now. Please try again later.";

#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    store: StoredValue<Option<AuthStore>, LocalStorage>,
}

impl AuthContext {
    /// Starts in the loading state with no store attached.
    pub fn new() -> Self {
        Self { state: RwSignal::new(AuthState::loading()), store: StoredValue::new_local(None) }
    }

    pub fn state(self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    /// The live store, or `None` before startup finishes (and always during SSR).
    pub fn store(self) -> Option<AuthStore> {
        self.store.get_value()
    }

    /// No service available: settle as signed out so guards can redirect.
    pub fn mark_unavailable(self) {
        self.state.set(AuthState::signed_out());
    }

    /// Build a store on `service`, start its bridge, and mirror published
    /// state into the signal until the bridge stops.
    pub async fn run(self, service: Rc<dyn identity::IdentityService>) {
        let (store, bridge) = AuthStore::new(service);
        self.store.set_value(Some(store.clone()));
        leptos::task::spawn_local(bridge.run());

        let mut rx = store.subscribe();
        loop {
            let next = rx.borrow_and_update().clone();
            self.state.set(next);
            if rx.changed().await.is_err() {
                tracing::debug!("auth store closed");
                break;
            }
        }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve service config, construct the HTTP client with browser session
/// storage, and run the auth context. Browser only.
#[cfg(feature = "hydrate")]
pub fn connect(auth: AuthContext) {
    leptos::task::spawn_local(async move {
        let config = match crate::net::api::resolve_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "auth service not configured");
                auth.mark_unavailable();
                return;
            }
        };
        let storage = Box::new(crate::net::storage::BrowserSessionStorage);
        match identity::SupabaseClient::with_storage(config, storage) {
            Ok(client) => auth.run(Rc::new(client)).await,
            Err(e) => {
                tracing::error!(error = %e, "auth client construction failed");
                auth.mark_unavailable();
            }
        }
    });
}
