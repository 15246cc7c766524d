//! Account creation for both roles.
//!
//! Like login, success does not navigate here: the new identity's sign-in
//! event publishes the user and the guest guard moves them to their
//! dashboard.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use identity::routing::LOGIN_ROUTE;
use identity::{CompanySignupData, CompanySize, ContactPerson, Role, SignupData, SignupOutcome, StudentSignupData};
use leptos::prelude::*;

use crate::components::role_guard::GuestOnly;
use crate::components::text_field::TextField;
use crate::state::auth::{AuthContext, SERVICE_UNAVAILABLE};
use crate::util::form::current_year;

/// Raw student form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub major: String,
    pub graduation_year: String,
}

/// Raw company form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_position: String,
}

impl StudentForm {
    pub fn into_signup(self, current_year: i32) -> Result<SignupData, &'static str> {
        let graduation_year = self
            .graduation_year
            .trim()
            .parse::<i32>()
            .map_err(|_| "Enter a graduation year.")?;
        let data = SignupData::Student(StudentSignupData {
            email: self.email.trim().to_owned(),
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            university: self.university,
            major: self.major,
            graduation_year,
        });
        data.validate(current_year)?;
        Ok(data)
    }
}

impl CompanyForm {
    pub fn into_signup(self, current_year: i32) -> Result<SignupData, &'static str> {
        let company_size = self
            .company_size
            .parse::<CompanySize>()
            .map_err(|_| "Select a company size.")?;
        let data = SignupData::Company(CompanySignupData {
            email: self.email.trim().to_owned(),
            password: self.password,
            company_name: self.company_name,
            industry: self.industry,
            company_size,
            contact: ContactPerson {
                first_name: self.contact_first_name,
                last_name: self.contact_last_name,
                position: self.contact_position,
            },
        });
        data.validate(current_year)?;
        Ok(data)
    }
}

/// Message shown when the account exists but nobody is signed in yet.
pub fn signup_notice(outcome: SignupOutcome, email: &str) -> Option<String> {
    match outcome {
        SignupOutcome::SignedIn => None,
        SignupOutcome::ConfirmationPending => {
            Some(format!("Check {email} for a confirmation link, then sign in."))
        }
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <GuestOnly>
            <SignupForms/>
        </GuestOnly>
    }
}

#[component]
fn SignupForms() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let role = RwSignal::new(Role::Student);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);

    // Shared credentials.
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    // Student.
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let university = RwSignal::new(String::new());
    let major = RwSignal::new(String::new());
    let graduation_year = RwSignal::new((current_year() + 1).to_string());
    // Company.
    let company_name = RwSignal::new(String::new());
    let industry = RwSignal::new(String::new());
    let company_size = RwSignal::new(String::new());
    let contact_first_name = RwSignal::new(String::new());
    let contact_last_name = RwSignal::new(String::new());
    let contact_position = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let built = match role.get() {
            Role::Student => StudentForm {
                email: email.get(),
                password: password.get(),
                first_name: first_name.get(),
                last_name: last_name.get(),
                university: university.get(),
                major: major.get(),
                graduation_year: graduation_year.get(),
            }
            .into_signup(current_year()),
            Role::Company => CompanyForm {
                email: email.get(),
                password: password.get(),
                company_name: company_name.get(),
                industry: industry.get(),
                company_size: company_size.get(),
                contact_first_name: contact_first_name.get(),
                contact_last_name: contact_last_name.get(),
                contact_position: contact_position.get(),
            }
            .into_signup(current_year()),
        };
        let data = match built {
            Ok(data) => data,
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
        notice.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match store.signup(&data).await {
                Ok(outcome) => {
                    notice.set(signup_notice(outcome, data.email()));
                    password.set(String::new());
                }
                Err(e) => {
                    tracing::warn!(code = e.error_code(), "signup failed");
                    error.set(e.to_string());
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        drop((store, data));
    };

    let role_tab = move |which: Role, label: &'static str| {
        view! {
            <button
                class="tab"
                class:tab--active=move || role.get() == which
                type="button"
                on:click=move |_| {
                    role.set(which);
                    error.set(String::new());
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <div class="auth-card__brand">
                    <span class="brand-mark">"SC"</span>
                    <span class="brand-name">"StudentConnect"</span>
                </div>
                <h1>"Create Account"</h1>
                <p class="auth-card__subtitle">"Choose your account type to get started"</p>
                <div class="tabs">
                    {role_tab(Role::Student, "Student")}
                    {role_tab(Role::Company, "Company")}
                </div>
                <Show when=move || notice.get().is_some()>
                    <p class="form-notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || role.get() == Role::Student>
                        <div class="field-row">
                            <TextField id="first_name" label="First Name" value=first_name placeholder="John" disabled=busy/>
                            <TextField id="last_name" label="Last Name" value=last_name placeholder="Doe" disabled=busy/>
                        </div>
                        <TextField id="university" label="University" value=university disabled=busy/>
                        <TextField id="major" label="Major" value=major disabled=busy/>
                        <TextField id="graduation_year" label="Graduation Year" value=graduation_year kind="number" disabled=busy/>
                    </Show>
                    <Show when=move || role.get() == Role::Company>
                        <TextField id="company_name" label="Company Name" value=company_name disabled=busy/>
                        <TextField id="industry" label="Industry" value=industry disabled=busy/>
                        <div class="field">
                            <label class="field__label" for="company_size">"Company Size"</label>
                            <select
                                id="company_size"
                                class="input"
                                prop:value=move || company_size.get()
                                on:change=move |ev| company_size.set(event_target_value(&ev))
                                disabled=move || busy.get()
                            >
                                <option value="">"Select company size"</option>
                                {CompanySize::ALL
                                    .iter()
                                    .map(|size| view! { <option value=size.as_str()>{size.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="field-row">
                            <TextField id="contact_first_name" label="Contact First Name" value=contact_first_name disabled=busy/>
                            <TextField id="contact_last_name" label="Contact Last Name" value=contact_last_name disabled=busy/>
                        </div>
                        <TextField id="contact_position" label="Position" value=contact_position disabled=busy/>
                    </Show>
                    <TextField id="email" label="Email" value=email kind="email" placeholder="you@example.com" disabled=busy/>
                    <TextField id="password" label="Password" value=password kind="password" disabled=busy/>
                    <Show when=move || !error.get().is_empty()>
                        <p class="form-error">{move || error.get()}</p>
                    </Show>
                    <button class="button button--block" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href=LOGIN_ROUTE>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
