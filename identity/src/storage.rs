//! Where the service client keeps the current session between calls and
//! (in the browser) between page loads.

use std::cell::RefCell;

use crate::service::Session;

pub trait SessionStorage {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// Process-local storage; the session dies with the client.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    session: RefCell<Option<Session>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn save(&self, session: &Session) {
        *self.session.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        *self.session.borrow_mut() = None;
    }
}
