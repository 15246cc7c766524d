#![recursion_limit = "256"]
//! # client
//!
//! Leptos + WASM frontend for StudentConnect: the public landing page, login
//! and signup, and the role-scoped student and company dashboards.
//!
//! Auth state comes from the `identity` crate. In the browser an
//! [`identity::AuthStore`] is built once at startup and mirrored into a
//! reactive signal; during SSR the state stays "loading" and guarded pages
//! render their spinner until hydration takes over.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the server markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
