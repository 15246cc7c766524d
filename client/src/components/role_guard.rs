//! Guard wrappers for role-scoped and guest-only routes.
//!
//! While the session resolves a spinner is shown; while a redirect is in
//! flight nothing is rendered, so a wrong-role page never flashes.

use identity::guard::GuardState;
use identity::Role;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthContext;
use crate::util::auth::{install_guest_guard, install_role_guard};

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-screen__spinner"></div>
            <p class="loading-screen__text">"Loading..."</p>
        </div>
    }
}

fn render(guard: Memo<GuardState>, children: ChildrenFn) -> impl IntoView {
    move || match guard.get() {
        GuardState::Checking => view! { <LoadingScreen/> }.into_any(),
        GuardState::Redirecting(_) => ().into_any(),
        GuardState::Authorized => children().into_any(),
    }
}

/// Render `children` only for a signed-in user whose role is `role`.
#[component]
pub fn RoleGuard(role: Role, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let guard = install_role_guard(auth.state(), role, use_navigate());
    render(guard, children)
}

/// Render `children` only while nobody is signed in.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let guard = install_guest_guard(auth.state(), use_navigate());
    render(guard, children)
}
