//! Company dashboard: company summary, contact, and an editor for the
//! public-facing fields.

#[cfg(test)]
#[path = "company_dashboard_test.rs"]
mod company_dashboard_test;

use identity::routing::welcome_message;
use identity::{CompanyProfile, ProfilePatch, Role, User};
use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::profile_card::{ProfileField, ProfileSection, completion_label, or_not_added, verified_label};
use crate::components::role_guard::RoleGuard;
use crate::components::text_field::TextField;
use crate::state::auth::{AuthContext, SERVICE_UNAVAILABLE};
use crate::util::form::non_blank;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyEdits {
    pub website: String,
    pub headquarters: String,
    pub description: String,
}

impl CompanyEdits {
    pub fn from_profile(profile: &CompanyProfile) -> Self {
        Self {
            website: profile.website.clone().unwrap_or_default(),
            headquarters: profile.headquarters.clone().unwrap_or_default(),
            description: profile.description.clone().unwrap_or_default(),
        }
    }
}

/// Complete once a description and a website are present. Verification is
/// granted elsewhere and never written from here.
pub fn company_patch(edits: &CompanyEdits) -> ProfilePatch {
    let website = non_blank(&edits.website);
    let description = non_blank(&edits.description);
    ProfilePatch {
        is_profile_complete: Some(website.is_some() && description.is_some()),
        website: Some(website.unwrap_or_default()),
        headquarters: Some(non_blank(&edits.headquarters).unwrap_or_default()),
        description: Some(description.unwrap_or_default()),
        ..ProfilePatch::default()
    }
}

pub fn size_label(profile: &CompanyProfile) -> String {
    or_not_added(profile.company_size.map(|s| s.label()).as_deref())
}

fn company_of(user: Option<&User>) -> Option<CompanyProfile> {
    match user {
        Some(User::Company(profile)) => Some(profile.clone()),
        _ => None,
    }
}

#[component]
pub fn CompanyDashboardPage() -> impl IntoView {
    view! {
        <RoleGuard role=Role::Company>
            <DashboardLayout role=Role::Company>
                <CompanyDashboard/>
            </DashboardLayout>
        </RoleGuard>
    }
}

#[component]
fn CompanyDashboard() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state();
    let profile = Memo::new(move |_| company_of(state.get().user()));

    view! {
        <section class="dashboard-hero">
            <h1>{move || welcome_message(state.get().user())}</h1>
            <p class="dashboard-hero__subtitle">
                "Post projects and connect with talented students."
            </p>
        </section>
        <section id="projects" class="dashboard-card">
            <h2>"Projects"</h2>
            <p class="dashboard-card__empty">"Project posting is coming soon."</p>
        </section>
        <section id="candidates" class="dashboard-card">
            <h2>"Candidates"</h2>
            <p class="dashboard-card__empty">"Applicants will show up here."</p>
        </section>
        <section id="profile" class="dashboard-card">
            <h2>"Company Profile"</h2>
            {move || profile.get().map(|p| view! { <CompanySummary profile=p/> })}
            <CompanyEditor profile/>
        </section>
    }
}

#[component]
fn CompanySummary(profile: CompanyProfile) -> impl IntoView {
    let contact = format!("{} {}", profile.contact.first_name, profile.contact.last_name);
    let size = size_label(&profile);
    let website = or_not_added(profile.website.as_deref());
    let headquarters = or_not_added(profile.headquarters.as_deref());
    let description = or_not_added(profile.description.as_deref());
    view! {
        <div class="profile-grid">
            <ProfileSection title="Company">
                <ProfileField label="Name" value=profile.company_name.clone()/>
                <ProfileField label="Industry" value=profile.industry.clone()/>
                <ProfileField label="Size" value=size/>
                <ProfileField label="Verified" value=verified_label(profile.is_verified).to_owned()/>
                <ProfileField label="Profile" value=completion_label(profile.is_profile_complete).to_owned()/>
            </ProfileSection>
            <ProfileSection title="Contact">
                <ProfileField label="Name" value=contact/>
                <ProfileField label="Position" value=profile.contact.position.clone()/>
                <ProfileField label="Email" value=profile.email.clone()/>
            </ProfileSection>
            <ProfileSection title="About">
                <ProfileField label="Website" value=website/>
                <ProfileField label="Headquarters" value=headquarters/>
                <ProfileField label="Description" value=description/>
            </ProfileSection>
        </div>
    }
}

#[component]
fn CompanyEditor(profile: Memo<Option<CompanyProfile>>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let editing = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());

    let website = RwSignal::new(String::new());
    let headquarters = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());

    let on_edit = move |_| {
        let Some(current) = profile.get_untracked() else {
            return;
        };
        let edits = CompanyEdits::from_profile(&current);
        website.set(edits.website);
        headquarters.set(edits.headquarters);
        description.set(edits.description);
        error.set(String::new());
        editing.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let patch = company_patch(&CompanyEdits {
            website: website.get(),
            headquarters: headquarters.get(),
            description: description.get(),
        });
        let Some(store) = auth.store() else {
            error.set(SERVICE_UNAVAILABLE.to_owned());
            return;
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match store.update_profile(&patch).await {
                Ok(_) => editing.set(false),
                Err(e) => {
                    tracing::warn!(code = e.error_code(), "company profile update failed");
                    error.set(e.to_string());
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        drop((store, patch));
    };

    view! {
        <Show
            when=move || editing.get()
            fallback=move || view! {
                <button class="button" on:click=on_edit disabled=move || profile.get().is_none()>
                    "Edit Profile"
                </button>
            }
        >
            <form class="profile-form" on:submit=on_submit>
                <TextField
                    id="website"
                    label="Website"
                    value=website
                    kind="url"
                    placeholder="https://example.com"
                    disabled=busy
                />
                <TextField id="headquarters" label="Headquarters" value=headquarters disabled=busy/>
                <div class="field">
                    <label class="field__label" for="description">"Description"</label>
                    <textarea
                        id="description"
                        class="input"
                        rows="4"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    ></textarea>
                </div>
                <Show when=move || !error.get().is_empty()>
                    <p class="form-error">{move || error.get()}</p>
                </Show>
                <div class="profile-form__actions">
                    <button class="button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </button>
                    <button
                        class="button button--ghost"
                        type="button"
                        on:click=move |_| editing.set(false)
                        disabled=move || busy.get()
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        </Show>
    }
}
