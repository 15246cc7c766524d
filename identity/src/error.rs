//! Error types for the identity service boundary and the auth store.
//!
//! ERROR HANDLING
//! ==============
//! `ServiceError` describes what went wrong talking to the hosted service.
//! `AuthError` is what store callers see: always a displayable message, sorted
//! into the handful of cases views react to differently.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Failure reported by an [`IdentityService`](crate::service::IdentityService).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Email/password pair rejected.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The request never produced a response (network, CORS, DNS).
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success status. `message` is `None` when the body had no
    /// recognizable error field.
    #[error("service responded with status {status}")]
    Response { status: u16, message: Option<String> },

    /// Response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Single-row select matched nothing.
    #[error("profile not found")]
    NotFound,
}

impl ServiceError {
    /// The human-readable part of the error, if the service supplied one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::InvalidCredentials(msg) | Self::Request(msg) | Self::Decode(msg) => Some(msg.clone()),
            Self::Response { message, .. } => message.clone(),
            Self::NotFound => Some(self.to_string()),
        }
    }
}

/// Failure surfaced by [`AuthStore`](crate::store::AuthStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Bad email or password.
    #[error("{0}")]
    Credential(String),

    /// Network or service failure; message passed through.
    #[error("{0}")]
    Service(String),

    /// The identity was created but writing its profile failed.
    #[error("{0}")]
    ProfileWrite(String),

    /// The operation needs a signed-in user and there is none.
    #[error("No authenticated user")]
    NotAuthenticated,
}

impl AuthError {
    /// Map a service failure for operation `op` (e.g. `"Login"`).
    ///
    /// Errors without a usable message become `"<op> failed: Unknown error occurred"`.
    #[must_use]
    pub fn from_service(op: &str, err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials(msg) => Self::Credential(msg),
            other => Self::Service(
                other
                    .message()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("{op} failed: Unknown error occurred")),
            ),
        }
    }

    /// Stable machine-readable code for logs and UI hooks.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Credential(_) => "E_CREDENTIAL",
            Self::Service(_) => "E_SERVICE",
            Self::ProfileWrite(_) => "E_PROFILE_WRITE",
            Self::NotAuthenticated => "E_NOT_AUTHENTICATED",
        }
    }
}
