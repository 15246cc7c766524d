//! Shared route-guard wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded pages apply identical redirect behavior: the decision comes from
//! `identity::guard`, this module turns it into a memo plus an effect that
//! performs the navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use identity::guard::{self, GuardState};
use identity::{AuthState, Role};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Guard redirects replace the history entry so "back" does not bounce.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

fn install<F>(guard: Memo<GuardState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = guard.get().redirect_target() {
            tracing::debug!(to = path, "guard redirect");
            navigate(path, redirect_options());
        }
    });
}

/// Page only `required` may see: others go to `/login` or their own dashboard.
pub fn install_role_guard<F>(auth: ReadSignal<AuthState>, required: Role, navigate: F) -> Memo<GuardState>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let guard = Memo::new(move |_| guard::evaluate(&auth.get(), required));
    install(guard, navigate);
    guard
}

/// Guest-only page (login, signup): signed-in users go to their dashboard.
pub fn install_guest_guard<F>(auth: ReadSignal<AuthState>, navigate: F) -> Memo<GuardState>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let guard = Memo::new(move |_| guard::evaluate_guest(&auth.get()));
    install(guard, navigate);
    guard
}
