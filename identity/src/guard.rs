//! Route-guard decisions for role-scoped and guest-only pages.
//!
//! Evaluation is pure; the UI layer runs it inside a reactive effect and
//! performs the navigation when the result is `Redirecting`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::profile::Role;
use crate::routing::{LOGIN_ROUTE, dashboard_route, is_authorized_for_route};
use crate::state::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Session still resolving; show a spinner.
    Checking,
    /// Navigation to the path is being issued; render nothing.
    Redirecting(&'static str),
    /// Render the page.
    Authorized,
}

impl GuardState {
    #[must_use]
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Redirecting(path) => Some(path),
            Self::Checking | Self::Authorized => None,
        }
    }
}

/// Guard for a page only `required` may see.
#[must_use]
pub fn evaluate(state: &AuthState, required: Role) -> GuardState {
    evaluate_route(state, required.dashboard_route())
}

/// Guard for any path under a role dashboard. Users who may not see `route`
/// are sent to their own dashboard.
#[must_use]
pub fn evaluate_route(state: &AuthState, route: &str) -> GuardState {
    if state.is_loading() {
        return GuardState::Checking;
    }
    match state.user() {
        None => GuardState::Redirecting(LOGIN_ROUTE),
        Some(user) if is_authorized_for_route(Some(user), route) => GuardState::Authorized,
        user => GuardState::Redirecting(dashboard_route(user)),
    }
}

/// Guard for login/signup: signed-in users are sent to their dashboard.
#[must_use]
pub fn evaluate_guest(state: &AuthState) -> GuardState {
    if state.is_loading() {
        return GuardState::Checking;
    }
    match state.user() {
        Some(user) => GuardState::Redirecting(dashboard_route(Some(user))),
        None => GuardState::Authorized,
    }
}
