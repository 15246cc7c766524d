//! HTTP implementation of [`IdentityService`] against Supabase's auth
//! (GoTrue) and data (PostgREST) APIs.
//!
//! Thin wrapper: requests are built and sent here, while body parsing and
//! error classification are pure functions so they can be tested without a
//! network.

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::config::SupabaseConfig;
use crate::error::ServiceError;
use crate::profile::{ProfilePatch, ProfileRow};
use crate::service::{AUTH_EVENT_CAPACITY, AuthEvent, CreatedIdentity, IdentityService, Session, SessionUser, Subscription};
use crate::storage::{MemoryStorage, SessionStorage};

const PROFILES_TABLE: &str = "profiles";
/// PostgREST: respond with one object instead of an array; 406 when no row matches.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";
const INVALID_CREDENTIALS_FALLBACK: &str = "Invalid login credentials";

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
    storage: Box<dyn SessionStorage>,
    events: broadcast::Sender<AuthEvent>,
}

impl SupabaseClient {
    /// Client whose session lives only in memory.
    pub fn new(config: SupabaseConfig) -> Result<Self, ServiceError> {
        Self::with_storage(config, Box::new(MemoryStorage::new()))
    }

    pub fn with_storage(config: SupabaseConfig, storage: Box<dyn SessionStorage>) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Ok(Self { http, config, storage, events })
    }

    fn emit(&self, event: AuthEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("no auth event subscribers");
        }
    }

    /// Stored session, refreshed first when its access token has expired.
    ///
    /// A session that cannot be refreshed is dropped and `SignedOut` emitted,
    /// so callers fall back to the anon role instead of sending a dead token.
    async fn current_session(&self) -> Option<Session> {
        let session = self.storage.load()?;
        if !session.is_expired_at(now()) {
            return Some(session);
        }

        let refreshed = match session.refresh_token.as_deref() {
            Some(refresh_token) => self.refresh(refresh_token).await,
            None => Err(ServiceError::Request("no refresh token".to_owned())),
        };
        match refreshed {
            Ok(fresh) => {
                tracing::debug!(user_id = %fresh.user.id, "session refreshed");
                self.storage.save(&fresh);
                Some(fresh)
            }
            Err(e) => {
                tracing::warn!(user_id = %session.user.id, error = %e, "expired session could not be refreshed; discarding");
                self.storage.clear();
                self.emit(AuthEvent::SignedOut);
                None
            }
        }
    }

    async fn bearer(&self) -> String {
        let token = self
            .current_session()
            .await
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token);
        format!("Bearer {token}")
    }

    fn auth_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.auth_url(path))
            .header("apikey", &self.config.anon_key)
    }

    /// Request against the caller's own profile row.
    async fn profile_request(&self, method: Method, user_id: &str) -> RequestBuilder {
        let bearer = self.bearer().await;
        self.http
            .request(method, self.config.rest_url(PROFILES_TABLE))
            .query(&[("user_id", format!("eq.{user_id}"))])
            .header("apikey", &self.config.anon_key)
            .header("Authorization", bearer)
    }

    async fn send(request: RequestBuilder) -> Result<(u16, String), ServiceError> {
        let response = request.send().await.map_err(|e| ServiceError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok((status, text))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, ServiceError> {
        let request = self
            .auth_request(Method::POST, "/token?grant_type=refresh_token")
            .json(&serde_json::json!({ "refresh_token": refresh_token }));
        let (status, body) = Self::send(request).await?;
        if !is_success(status) {
            return Err(error_from_response(status, &body));
        }
        parse_session(&body, now())
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityService for SupabaseClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        let request = self
            .auth_request(Method::POST, "/token?grant_type=password")
            .json(&serde_json::json!({ "email": email, "password": password }));
        let (status, body) = Self::send(request).await?;
        if !is_success(status) {
            return Err(sign_in_error(status, &body));
        }

        let session = parse_session(&body, now())?;
        self.storage.save(&session);
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<CreatedIdentity, ServiceError> {
        let request = self
            .auth_request(Method::POST, "/signup")
            .json(&serde_json::json!({ "email": email, "password": password }));
        let (status, body) = Self::send(request).await?;
        if !is_success(status) {
            return Err(error_from_response(status, &body));
        }

        let (identity, session) = parse_signup(&body, now())?;
        match session {
            Some(session) => {
                self.storage.save(&session);
                self.emit(AuthEvent::SignedIn(session));
            }
            None => tracing::info!(user_id = %identity.id, "signup pending email confirmation"),
        }
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        if let Some(session) = self.current_session().await {
            let request = self
                .auth_request(Method::POST, "/logout")
                .header("Authorization", format!("Bearer {}", session.access_token));
            let (status, body) = Self::send(request).await?;
            // 401/404: the token is already dead server-side.
            if !is_success(status) && status != 401 && status != 404 {
                return Err(error_from_response(status, &body));
            }
        }
        self.storage.clear();
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, ServiceError> {
        Ok(self.current_session().await)
    }

    fn on_auth_state_change(&self) -> Subscription {
        Subscription::new(self.events.subscribe())
    }

    async fn select_profile(&self, user_id: &str) -> Result<ProfileRow, ServiceError> {
        let request = self
            .profile_request(Method::GET, user_id)
            .await
            .query(&[("select", "*")])
            .header("Accept", SINGLE_OBJECT);
        let (status, body) = Self::send(request).await?;
        parse_profile(status, &body)
    }

    async fn update_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<ProfileRow, ServiceError> {
        let request = self
            .profile_request(Method::PATCH, user_id)
            .await
            .query(&[("select", "*")])
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(patch);
        let (status, body) = Self::send(request).await?;
        parse_profile(status, &body)
    }

    async fn write_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), ServiceError> {
        let request = self
            .profile_request(Method::PATCH, user_id)
            .await
            .header("Prefer", RETURN_MINIMAL)
            .json(patch);
        let (status, body) = Self::send(request).await?;
        parse_write(status, &body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: SessionUser,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.or(self.expires_in.map(|secs| now + secs)),
            user: self.user,
        }
    }
}

/// Auto-confirming projects answer signup with a session; others with the bare user.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session(TokenResponse),
    User(SessionUser),
}

// =============================================================================
// PARSING
// =============================================================================

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub(crate) fn parse_session(body: &str, now: i64) -> Result<Session, ServiceError> {
    let token: TokenResponse = serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    Ok(token.into_session(now))
}

pub(crate) fn parse_signup(body: &str, now: i64) -> Result<(CreatedIdentity, Option<Session>), ServiceError> {
    let response: SignupResponse = serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    Ok(match response {
        SignupResponse::Session(token) => {
            let session = token.into_session(now);
            let identity = CreatedIdentity {
                id: session.user.id.clone(),
                email: session.user.email.clone(),
                session_started: true,
            };
            (identity, Some(session))
        }
        SignupResponse::User(user) => {
            (CreatedIdentity { id: user.id, email: user.email, session_started: false }, None)
        }
    })
}

pub(crate) fn parse_profile(status: u16, body: &str) -> Result<ProfileRow, ServiceError> {
    if status == 406 {
        return Err(ServiceError::NotFound);
    }
    if !is_success(status) {
        return Err(error_from_response(status, body));
    }
    serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Any 2xx is success, whatever the body; a PATCH matching no row answers
/// 204 or `[]`.
pub(crate) fn parse_write(status: u16, body: &str) -> Result<(), ServiceError> {
    if is_success(status) { Ok(()) } else { Err(error_from_response(status, body)) }
}

/// First non-empty string among the fields GoTrue and PostgREST use for
/// human-readable errors.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_owned)
}

pub(crate) fn error_from_response(status: u16, body: &str) -> ServiceError {
    ServiceError::Response { status, message: error_message(body) }
}

/// Password grant failures: rejected credentials are reported apart from
/// everything else.
pub(crate) fn sign_in_error(status: u16, body: &str) -> ServiceError {
    let value: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let code = ["error_code", "error", "code"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str));

    if status == 400 && matches!(code, Some("invalid_grant" | "invalid_credentials")) {
        let message = error_message(body).unwrap_or_else(|| INVALID_CREDENTIALS_FALLBACK.to_owned());
        return ServiceError::InvalidCredentials(message);
    }
    error_from_response(status, body)
}
