//! In-memory identity service and fixtures shared by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, broadcast};

use crate::error::ServiceError;
use crate::profile::{ProfilePatch, ProfileRow, Role, User};
use crate::service::{AUTH_EVENT_CAPACITY, AuthEvent, CreatedIdentity, IdentityService, Session, SessionUser, Subscription};
use crate::store::AuthStore;

// =============================================================================
// FIXTURES
// =============================================================================

pub(crate) fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap()
}

/// Row as the signup trigger leaves it: role columns empty.
pub(crate) fn blank_row(user_id: &str, email: &str, role: Role) -> ProfileRow {
    ProfileRow {
        id: format!("p-{user_id}"),
        user_id: user_id.to_owned(),
        user_type: role,
        email: email.to_owned(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
        first_name: None,
        last_name: None,
        university: None,
        major: None,
        graduation_year: None,
        skills: None,
        bio: None,
        portfolio_url: None,
        linkedin_url: None,
        github_url: None,
        company_name: None,
        industry: None,
        company_size: None,
        website: None,
        description: None,
        contact_first_name: None,
        contact_last_name: None,
        contact_position: None,
        headquarters: None,
        is_verified: None,
        is_profile_complete: false,
    }
}

pub(crate) fn student_row(user_id: &str, email: &str) -> ProfileRow {
    ProfileRow {
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        university: Some("State University".into()),
        major: Some("Mathematics".into()),
        graduation_year: Some(2027),
        skills: Some(vec![]),
        ..blank_row(user_id, email, Role::Student)
    }
}

pub(crate) fn company_row(user_id: &str, email: &str) -> ProfileRow {
    ProfileRow {
        company_name: Some("Acme".into()),
        industry: Some("Manufacturing".into()),
        company_size: Some("11-50".into()),
        contact_first_name: Some("Wile".into()),
        contact_last_name: Some("Coyote".into()),
        contact_position: Some("Recruiter".into()),
        is_verified: Some(false),
        ..blank_row(user_id, email, Role::Company)
    }
}

pub(crate) fn student_user(user_id: &str, email: &str) -> User {
    User::from(student_row(user_id, email))
}

pub(crate) fn company_user(user_id: &str, email: &str) -> User {
    User::from(company_row(user_id, email))
}

pub(crate) fn session_for(user_id: &str, email: &str) -> Session {
    Session {
        access_token: format!("token-{user_id}"),
        refresh_token: Some(format!("refresh-{user_id}")),
        expires_at: None,
        user: SessionUser { id: user_id.to_owned(), email: Some(email.to_owned()) },
    }
}

// =============================================================================
// FAKE SERVICE
// =============================================================================

struct Account {
    user_id: String,
    password: String,
}

#[derive(Default)]
struct FakeState {
    accounts: HashMap<String, Account>,
    profiles: HashMap<String, ProfileRow>,
    session: Option<Session>,
    next_id: u32,
    fail_get_session: bool,
    require_confirmation: bool,
    fail_profile_write: Option<ServiceError>,
    fail_sign_out: Option<ServiceError>,
    gates: HashMap<String, Rc<Notify>>,
    profile_fetches: usize,
    profile_writes: usize,
    sign_out_calls: usize,
}

/// Identity service backed by hash maps. Auto-confirms signups unless
/// [`FakeIdentityService::require_confirmation`] is set.
///
/// Emits the same events the hosted service does: `SignedIn` after sign-in
/// and signup, `SignedOut` after sign-out.
pub(crate) struct FakeIdentityService {
    inner: RefCell<FakeState>,
    events: broadcast::Sender<AuthEvent>,
}

impl FakeIdentityService {
    pub(crate) fn new() -> Rc<Self> {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Rc::new(Self { inner: RefCell::new(FakeState::default()), events })
    }

    /// Register an account with a filled-in student profile. Returns its id.
    pub(crate) fn add_student(&self, email: &str, password: &str) -> String {
        self.add_account(email, password, |id| student_row(id, email))
    }

    pub(crate) fn add_company(&self, email: &str, password: &str) -> String {
        self.add_account(email, password, |id| company_row(id, email))
    }

    fn add_account(&self, email: &str, password: &str, row: impl FnOnce(&str) -> ProfileRow) -> String {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let user_id = format!("u-{}", inner.next_id);
        inner
            .accounts
            .insert(email.to_owned(), Account { user_id: user_id.clone(), password: password.to_owned() });
        inner.profiles.insert(user_id.clone(), row(&user_id));
        user_id
    }

    /// Pretend a session was persisted by an earlier visit.
    pub(crate) fn restore_session(&self, email: &str) {
        let mut inner = self.inner.borrow_mut();
        let user_id = inner.accounts.get(email).map(|a| a.user_id.clone()).unwrap();
        inner.session = Some(session_for(&user_id, email));
    }

    pub(crate) fn remove_profile(&self, user_id: &str) {
        self.inner.borrow_mut().profiles.remove(user_id);
    }

    /// Signups create the account but start no session, as a project with
    /// email confirmation does.
    pub(crate) fn require_confirmation(&self) {
        self.inner.borrow_mut().require_confirmation = true;
    }

    pub(crate) fn fail_get_session(&self) {
        self.inner.borrow_mut().fail_get_session = true;
    }

    pub(crate) fn fail_profile_writes(&self, err: ServiceError) {
        self.inner.borrow_mut().fail_profile_write = Some(err);
    }

    pub(crate) fn fail_sign_out(&self, err: ServiceError) {
        self.inner.borrow_mut().fail_sign_out = Some(err);
    }

    /// Hold profile fetches for `user_id` until the returned gate is notified.
    pub(crate) fn gate_profile(&self, user_id: &str) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.inner.borrow_mut().gates.insert(user_id.to_owned(), Rc::clone(&gate));
        gate
    }

    pub(crate) fn profile(&self, user_id: &str) -> Option<ProfileRow> {
        self.inner.borrow().profiles.get(user_id).cloned()
    }

    pub(crate) fn user_id_for(&self, email: &str) -> Option<String> {
        self.inner.borrow().accounts.get(email).map(|a| a.user_id.clone())
    }

    pub(crate) fn has_session(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    pub(crate) fn profile_fetches(&self) -> usize {
        self.inner.borrow().profile_fetches
    }

    pub(crate) fn profile_writes(&self) -> usize {
        self.inner.borrow().profile_writes
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.inner.borrow().sign_out_calls
    }

    /// Push an event as if the service emitted it (e.g. a token refresh).
    pub(crate) fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityService for FakeIdentityService {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        let session = {
            let mut inner = self.inner.borrow_mut();
            let user_id = match inner.accounts.get(email) {
                Some(account) if account.password == password => account.user_id.clone(),
                _ => return Err(ServiceError::InvalidCredentials("Invalid login credentials".into())),
            };
            let session = session_for(&user_id, email);
            inner.session = Some(session.clone());
            session
        };
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<CreatedIdentity, ServiceError> {
        if self.inner.borrow().accounts.contains_key(email) {
            return Err(ServiceError::Response { status: 422, message: Some("User already registered".into()) });
        }
        let user_id = self.add_account(email, password, |id| blank_row(id, email, Role::Student));
        let session_started = !self.inner.borrow().require_confirmation;
        if session_started {
            let session = session_for(&user_id, email);
            self.inner.borrow_mut().session = Some(session.clone());
            self.emit(AuthEvent::SignedIn(session));
        }
        Ok(CreatedIdentity { id: user_id, email: Some(email.to_owned()), session_started })
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        {
            let mut inner = self.inner.borrow_mut();
            inner.sign_out_calls += 1;
            if let Some(err) = inner.fail_sign_out.clone() {
                return Err(err);
            }
            inner.session = None;
        }
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, ServiceError> {
        let inner = self.inner.borrow();
        if inner.fail_get_session {
            return Err(ServiceError::Request("connection refused".into()));
        }
        Ok(inner.session.clone())
    }

    fn on_auth_state_change(&self) -> Subscription {
        Subscription::new(self.events.subscribe())
    }

    async fn select_profile(&self, user_id: &str) -> Result<ProfileRow, ServiceError> {
        let gate = {
            let mut inner = self.inner.borrow_mut();
            inner.profile_fetches += 1;
            inner.gates.get(user_id).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.inner.borrow().profiles.get(user_id).cloned().ok_or(ServiceError::NotFound)
    }

    async fn update_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<ProfileRow, ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.profile_writes += 1;
        if let Some(err) = inner.fail_profile_write.clone() {
            return Err(err);
        }
        let row = inner.profiles.get_mut(user_id).ok_or(ServiceError::NotFound)?;
        patch.apply_to(row);
        Ok(row.clone())
    }

    async fn write_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.profile_writes += 1;
        if let Some(err) = inner.fail_profile_write.clone() {
            return Err(err);
        }
        // Unconfirmed accounts cannot see their row; the write matches nothing.
        if inner.require_confirmation && inner.session.is_none() {
            return Ok(());
        }
        if let Some(row) = inner.profiles.get_mut(user_id) {
            patch.apply_to(row);
        }
        Ok(())
    }
}

// =============================================================================
// HARNESS
// =============================================================================

/// Run `body` against a fresh store whose bridge is driven on a `LocalSet`.
pub(crate) async fn with_store<F, Fut>(service: &Rc<FakeIdentityService>, body: F)
where
    F: FnOnce(AuthStore) -> Fut,
    Fut: Future<Output = ()>,
{
    let service: Rc<dyn IdentityService> = Rc::clone(service) as Rc<dyn IdentityService>;
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let (store, bridge) = AuthStore::new(service);
            tokio::task::spawn_local(bridge.run());
            body(store).await;
        })
        .await;
}

/// Wait for the initial session to resolve.
pub(crate) async fn settled(store: &AuthStore) -> crate::state::AuthState {
    store.wait_for(|s| !s.is_loading()).await.unwrap()
}

/// Give spawned local tasks a chance to process everything queued.
pub(crate) async fn drain() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
