//! Root application component with routing and the auth context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    company_dashboard::CompanyDashboardPage, landing::LandingPage, login::LoginPage, signup::SignupPage,
    student_dashboard::StudentDashboardPage,
};
use crate::state::auth::AuthContext;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context and, in the browser, starts the auth service
/// connection before any route renders.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new();
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    crate::state::auth::connect(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/studentconnect.css"/>
        <Title text="StudentConnect"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("student")) view=StudentDashboardPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("company")) view=CompanyDashboardPage/>
            </Routes>
        </Router>
    }
}
