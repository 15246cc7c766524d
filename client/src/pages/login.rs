//! Email + password sign-in.
//!
//! A successful login does not navigate by itself: the guest guard redirects
//! to the user's dashboard once the signed-in state is published.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use identity::routing::SIGNUP_ROUTE;
use leptos::prelude::*;

use crate::components::role_guard::GuestOnly;
use crate::state::auth::{AuthContext, SERVICE_UNAVAILABLE};
use crate::util::form::is_plausible_email;

pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !is_plausible_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <GuestOnly>
            <LoginForm/>
        </GuestOnly>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        let Some(store) = auth.store() else {
            error.set(SERVICE_UNAVAILABLE.to_owned());
            return;
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = store.login(&email_value, &password_value).await {
                error.set(e.to_string());
                password.set(String::new());
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        drop((store, email_value, password_value));
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__brand">
                    <span class="brand-mark">"SC"</span>
                    <span class="brand-name">"StudentConnect"</span>
                </div>
                <h1>"Welcome Back"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        class="input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <Show when=move || !error.get().is_empty()>
                        <p class="form-error">{move || error.get()}</p>
                    </Show>
                    <button class="button button--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <a href=SIGNUP_ROUTE>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
