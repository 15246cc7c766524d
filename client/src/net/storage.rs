//! Browser `localStorage` persistence for the auth session, so a reload keeps
//! the user signed in.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: storage that is missing, full or holding a
//! corrupt entry behaves like "no session". SSR builds compile the type but
//! every call is a no-op.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use identity::service::Session;
use identity::storage::SessionStorage;

pub const STORAGE_KEY: &str = "studentconnect.auth.session";

#[cfg(any(test, feature = "hydrate"))]
fn decode(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable stored session");
            None
        }
    }
}

fn encode(session: &Session) -> Option<String> {
    serde_json::to_string(session).ok()
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// [`SessionStorage`] backed by `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStorage;

impl SessionStorage for BrowserSessionStorage {
    fn load(&self) -> Option<Session> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
            decode(&raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, session: &Session) {
        let Some(raw) = encode(session) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(STORAGE_KEY, &raw).is_err() {
                    tracing::warn!("could not persist session");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = raw;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.remove_item(STORAGE_KEY).is_err() {
                    tracing::warn!("could not remove stored session");
                }
            }
        }
    }
}
