//! Student dashboard: profile summary plus an editor for the optional fields.

#[cfg(test)]
#[path = "student_dashboard_test.rs"]
mod student_dashboard_test;

use identity::routing::welcome_message;
use identity::{ProfilePatch, Role, StudentProfile, User};
use leptos::prelude::*;

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::profile_card::{ProfileField, ProfileSection, completion_label, or_not_added, skills_label};
use crate::components::role_guard::RoleGuard;
use crate::components::text_field::TextField;
use crate::state::auth::{AuthContext, SERVICE_UNAVAILABLE};
use crate::util::form::{non_blank, parse_skills};

/// Editable student fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentEdits {
    pub bio: String,
    pub portfolio_url: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub skills: String,
}

impl StudentEdits {
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            bio: profile.bio.clone().unwrap_or_default(),
            portfolio_url: profile.portfolio_url.clone().unwrap_or_default(),
            linkedin_url: profile.linkedin_url.clone().unwrap_or_default(),
            github_url: profile.github_url.clone().unwrap_or_default(),
            skills: profile.skills.join(", "),
        }
    }
}

/// Blank text fields are written as empty strings so a cleared field
/// actually clears the column. The profile counts as complete once a bio
/// and at least one skill are present.
pub fn student_patch(edits: &StudentEdits) -> ProfilePatch {
    let bio = non_blank(&edits.bio);
    let skills = parse_skills(&edits.skills);
    ProfilePatch {
        is_profile_complete: Some(bio.is_some() && !skills.is_empty()),
        bio: Some(bio.unwrap_or_default()),
        portfolio_url: Some(non_blank(&edits.portfolio_url).unwrap_or_default()),
        linkedin_url: Some(non_blank(&edits.linkedin_url).unwrap_or_default()),
        github_url: Some(non_blank(&edits.github_url).unwrap_or_default()),
        skills: Some(skills),
        ..ProfilePatch::default()
    }
}

fn student_of(user: Option<&User>) -> Option<StudentProfile> {
    match user {
        Some(User::Student(profile)) => Some(profile.clone()),
        _ => None,
    }
}

#[component]
pub fn StudentDashboardPage() -> impl IntoView {
    view! {
        <RoleGuard role=Role::Student>
            <DashboardLayout role=Role::Student>
                <StudentDashboard/>
            </DashboardLayout>
        </RoleGuard>
    }
}

#[component]
fn StudentDashboard() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state();
    let profile = Memo::new(move |_| student_of(state.get().user()));

    view! {
        <section class="dashboard-hero">
            <h1>{move || welcome_message(state.get().user())}</h1>
            <p class="dashboard-hero__subtitle">
                "Find projects that match your skills and build your portfolio."
            </p>
        </section>
        <section id="projects" class="dashboard-card">
            <h2>"Projects"</h2>
            <p class="dashboard-card__empty">"Project matching is coming soon."</p>
        </section>
        <section id="portfolio" class="dashboard-card">
            <h2>"Portfolio"</h2>
            <p class="dashboard-card__empty">"Completed projects will show up here."</p>
        </section>
        <section id="profile" class="dashboard-card">
            <h2>"Your Profile"</h2>
            {move || profile.get().map(|p| view! { <StudentSummary profile=p/> })}
            <StudentEditor profile/>
        </section>
    }
}

#[component]
fn StudentSummary(profile: StudentProfile) -> impl IntoView {
    let graduation = profile.graduation_year.map(|y| y.to_string());
    view! {
        <div class="profile-grid">
            <ProfileSection title="Education">
                <ProfileField label="Name" value=format!("{} {}", profile.first_name, profile.last_name)/>
                <ProfileField label="University" value=profile.university.clone()/>
                <ProfileField label="Major" value=profile.major.clone()/>
                <ProfileField label="Graduation Year" value=or_not_added(graduation.as_deref())/>
            </ProfileSection>
            <ProfileSection title="Details">
                <ProfileField label="Email" value=profile.email.clone()/>
                <ProfileField label="Profile" value=completion_label(profile.is_profile_complete).to_owned()/>
                <ProfileField label="Skills" value=skills_label(&profile.skills)/>
                <ProfileField label="Bio" value=or_not_added(profile.bio.as_deref())/>
            </ProfileSection>
            <ProfileSection title="Links">
                <ProfileField label="Portfolio" value=or_not_added(profile.portfolio_url.as_deref())/>
                <ProfileField label="LinkedIn" value=or_not_added(profile.linkedin_url.as_deref())/>
                <ProfileField label="GitHub" value=or_not_added(profile.github_url.as_deref())/>
            </ProfileSection>
        </div>
    }
}

#[component]
fn StudentEditor(profile: Memo<Option<StudentProfile>>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let editing = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());

    let bio = RwSignal::new(String::new());
    let portfolio_url = RwSignal::new(String::new());
    let linkedin_url = RwSignal::new(String::new());
    let github_url = RwSignal::new(String::new());
    let skills = RwSignal::new(String::new());

    let on_edit = move |_| {
        let Some(current) = profile.get_untracked() else {
            return;
        };
        let edits = StudentEdits::from_profile(&current);
        bio.set(edits.bio);
        portfolio_url.set(edits.portfolio_url);
        linkedin_url.set(edits.linkedin_url);
        github_url.set(edits.github_url);
        skills.set(edits.skills);
        error.set(String::new());
        editing.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let patch = student_patch(&StudentEdits {
            bio: bio.get(),
            portfolio_url: portfolio_url.get(),
            linkedin_url: linkedin_url.get(),
            github_url: github_url.get(),
            skills: skills.get(),
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
                    tracing::warn!(code = e.error_code(), "student profile update failed");
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
                <div class="field">
                    <label class="field__label" for="bio">"Bio"</label>
                    <textarea
                        id="bio"
                        class="input"
                        rows="4"
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    ></textarea>
                </div>
                <TextField
                    id="skills"
                    label="Skills"
                    value=skills
                    placeholder="Rust, SQL, Figma"
                    disabled=busy
                />
                <TextField id="portfolio_url" label="Portfolio URL" value=portfolio_url kind="url" disabled=busy/>
                <TextField id="linkedin_url" label="LinkedIn URL" value=linkedin_url kind="url" disabled=busy/>
                <TextField id="github_url" label="GitHub URL" value=github_url kind="url" disabled=busy/>
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
