//! Public landing page with an audience toggle and waitlist capture.

#[cfg(test)]
#[path = "landing_test.rs"]
mod landing_test;

use identity::routing::{LOGIN_ROUTE, SIGNUP_ROUTE};
use leptos::prelude::*;

use crate::util::form::is_plausible_email;

/// How long the "thanks" state stays up before the form resets.
pub const WAITLIST_RESET_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    Students,
    Companies,
}

impl Audience {
    pub fn tab_label(self) -> &'static str {
        match self {
            Self::Students => "For Students",
            Self::Companies => "For Companies",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Self::Students => "Turn Your Assignments Into Career Opportunities",
            Self::Companies => "Get Fresh Perspectives on Business Challenges",
        }
    }

    pub fn pitch(self) -> &'static str {
        match self {
            Self::Students => {
                "Work on real business challenges, build your portfolio, and connect with industry \
                 professionals while earning academic credit."
            }
            Self::Companies => {
                "Partner with universities to have students tackle your real-world problems with \
                 innovative solutions and academic rigor."
            }
        }
    }
}

pub fn validate_waitlist_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if is_plausible_email(email) { Ok(email.to_owned()) } else { Err("Enter a valid email address.") }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let audience = RwSignal::new(Audience::Students);
    let email = RwSignal::new(String::new());
    let submitted = RwSignal::new(false);
    let error = RwSignal::new(None::<&'static str>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitted.get() {
            return;
        }
        match validate_waitlist_email(&email.get()) {
            Ok(address) => {
                tracing::info!(email = %address, "waitlist signup");
                error.set(None);
                submitted.set(true);

                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(WAITLIST_RESET_MS).await;
                    submitted.set(false);
                    email.set(String::new());
                });
            }
            Err(message) => error.set(Some(message)),
        }
    };

    let tab = move |which: Audience| {
        view! {
            <button
                class="tab"
                class:tab--active=move || audience.get() == which
                type="button"
                on:click=move |_| audience.set(which)
            >
                {which.tab_label()}
            </button>
        }
    };

    view! {
        <div class="landing">
            <header class="landing-header">
                <div class="landing-header__brand">
                    <span class="brand-mark">"SC"</span>
                    <span class="brand-name">"StudentConnect"</span>
                </div>
                <nav class="landing-nav">
                    <a href="#students">"For Students"</a>
                    <a href="#companies">"For Companies"</a>
                    <a href="#waitlist">"Join Waitlist"</a>
                </nav>
                <div class="landing-header__actions">
                    <a class="button button--ghost" href=LOGIN_ROUTE>"Sign In"</a>
                    <a class="button" href=SIGNUP_ROUTE>"Get Started"</a>
                </div>
            </header>

            <section class="hero">
                <span class="badge">"Coming Soon - Join the Waitlist"</span>
                <div class="tabs">{tab(Audience::Students)}{tab(Audience::Companies)}</div>
                <h1 class="hero__title">"StudentConnect"</h1>
                <h2 class="hero__headline">{move || audience.get().headline()}</h2>
                <p class="hero__pitch">{move || audience.get().pitch()}</p>

                <form id="waitlist" class="waitlist-form" on:submit=on_submit>
                    <input
                        class="input"
                        type="email"
                        placeholder="Enter your email for updates"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || submitted.get()
                    />
                    <button class="button" type="submit" disabled=move || submitted.get()>
                        {move || if submitted.get() { "Thanks! ✓" } else { "Join Waitlist" }}
                    </button>
                </form>
                <Show when=move || submitted.get()>
                    <p class="waitlist-form__thanks">"Thanks for joining! We'll keep you updated on our launch."</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </section>
        </div>
    }
}
