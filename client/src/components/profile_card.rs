//! Read-only profile summary pieces shared by both dashboards.

#[cfg(test)]
#[path = "profile_card_test.rs"]
mod profile_card_test;

use leptos::prelude::*;

pub const NOT_ADDED: &str = "Not added";

pub fn or_not_added(value: Option<&str>) -> String {
    value.unwrap_or(NOT_ADDED).to_owned()
}

pub fn completion_label(complete: bool) -> &'static str {
    if complete { "Complete" } else { "Incomplete" }
}

pub fn verified_label(verified: bool) -> &'static str {
    if verified { "Yes" } else { "Pending" }
}

pub fn skills_label(skills: &[String]) -> String {
    if skills.is_empty() { "None added yet".to_owned() } else { skills.join(", ") }
}

#[component]
pub fn ProfileField(label: &'static str, value: String) -> impl IntoView {
    view! {
        <p class="profile-field">
            <span class="profile-field__label">{label}": "</span>
            {value}
        </p>
    }
}

#[component]
pub fn ProfileSection(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="profile-section">
            <h3 class="profile-section__title">{title}</h3>
            <div class="profile-section__body">{children()}</div>
        </div>
    }
}
