//! Dashboard chrome: brand, per-role section anchors, greeting, sign-out.

#[cfg(test)]
#[path = "dashboard_layout_test.rs"]
mod dashboard_layout_test;

use identity::{Role, User};
use leptos::prelude::*;

use crate::state::auth::AuthContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

const STUDENT_NAV: [NavItem; 3] = [
    NavItem { href: "#projects", label: "Projects" },
    NavItem { href: "#portfolio", label: "Portfolio" },
    NavItem { href: "#profile", label: "Profile" },
];

const COMPANY_NAV: [NavItem; 3] = [
    NavItem { href: "#projects", label: "Projects" },
    NavItem { href: "#candidates", label: "Candidates" },
    NavItem { href: "#profile", label: "Profile" },
];

pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => &STUDENT_NAV,
        Role::Company => &COMPANY_NAV,
    }
}

/// Short header greeting; the page heading carries the longer welcome.
pub fn header_greeting(user: Option<&User>) -> String {
    user.map_or_else(|| "Welcome!".to_owned(), |u| format!("Welcome, {}!", u.display_name()))
}

/// Sign-out only asks the service; the route guard sends the user to
/// `/login` once the signed-out state is published.
#[component]
pub fn DashboardLayout(role: Role, children: Children) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state();
    let signing_out = RwSignal::new(false);

    let on_sign_out = move |_| {
        if signing_out.get() {
            return;
        }
        let Some(store) = auth.store() else {
            return;
        };
        signing_out.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            store.logout().await;
            signing_out.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        drop(store);
    };

    let nav = nav_items(role)
        .iter()
        .map(|item| view! { <a class="dashboard-nav__link" href=item.href>{item.label}</a> })
        .collect_view();

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div class="dashboard-header__brand">
                    <span class="brand-mark">"SC"</span>
                    <span class="brand-name">"StudentConnect"</span>
                </div>
                <nav class="dashboard-nav">{nav}</nav>
                <div class="dashboard-header__account">
                    <span class="dashboard-header__greeting">
                        {move || header_greeting(state.get().user())}
                    </span>
                    <button
                        class="button button--ghost"
                        on:click=on_sign_out
                        disabled=move || signing_out.get()
                    >
                        "Sign Out"
                    </button>
                </div>
            </header>
            <main class="dashboard-main">{children()}</main>
        </div>
    }
}
