//! Route constants and role-to-route mapping.

#[cfg(test)]
#[path = "routing_test.rs"]
mod tests;

use crate::profile::{Role, User};

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const SIGNUP_ROUTE: &str = "/signup";
pub const STUDENT_DASHBOARD_ROUTE: &str = "/dashboard/student";
pub const COMPANY_DASHBOARD_ROUTE: &str = "/dashboard/company";

impl Role {
    /// Dashboard owned by this role.
    #[must_use]
    pub fn dashboard_route(self) -> &'static str {
        match self {
            Self::Student => STUDENT_DASHBOARD_ROUTE,
            Self::Company => COMPANY_DASHBOARD_ROUTE,
        }
    }
}

/// Where a user lands after signing in; `/` when nobody is signed in.
#[must_use]
pub fn dashboard_route(user: Option<&User>) -> &'static str {
    user.map_or(HOME_ROUTE, |u| u.role().dashboard_route())
}

#[must_use]
pub fn welcome_message(user: Option<&User>) -> String {
    match user {
        None => "Welcome!".to_owned(),
        Some(u) => format!("Welcome back, {}!", u.display_name()),
    }
}

/// Role whose dashboard prefix `route` falls under.
///
/// Prefixes match whole path segments: `/dashboard/student/settings` is a
/// student route, `/dashboard/students` is not.
#[must_use]
pub fn required_role(route: &str) -> Option<Role> {
    [Role::Student, Role::Company]
        .into_iter()
        .find(|role| has_segment_prefix(route, role.dashboard_route()))
}

/// A role-prefixed route is open only to that role. Unknown routes and absent
/// users are never authorized.
#[must_use]
pub fn is_authorized_for_route(user: Option<&User>, route: &str) -> bool {
    match (user, required_role(route)) {
        (Some(user), Some(role)) => user.role() == role,
        _ => false,
    }
}

fn has_segment_prefix(route: &str, prefix: &str) -> bool {
    route
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') || rest.starts_with('#'))
}
