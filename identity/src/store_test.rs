use super::*;
use crate::error::ServiceError;
use crate::profile::{CompanySize, ContactPerson, Role};
use crate::signup::{CompanySignupData, StudentSignupData};
use crate::test_helpers::{FakeIdentityService, drain, settled, with_store};

fn student_signup(email: &str) -> SignupData {
    SignupData::Student(StudentSignupData {
        email: email.into(),
        password: "hunter22".into(),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        university: "Yale".into(),
        major: "Mathematics".into(),
        graduation_year: 2027,
    })
}

fn company_signup(email: &str) -> SignupData {
    SignupData::Company(CompanySignupData {
        email: email.into(),
        password: "hunter22".into(),
        company_name: "Initech".into(),
        industry: "Software".into(),
        company_size: CompanySize::Medium,
        contact: ContactPerson { first_name: "Bill".into(), last_name: "Lumbergh".into(), position: "VP".into() },
    })
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_authenticates_with_submitted_email() {
    let service = FakeIdentityService::new();
    service.add_student("ada@uni.edu", "pw");

    with_store(&service, |store| async move {
        assert_eq!(settled(&store).await, AuthState::signed_out());

        store.login("ada@uni.edu", "pw").await.unwrap();
        let state = store.wait_for(AuthState::is_authenticated).await.unwrap();

        assert!(!state.is_loading());
        assert_eq!(state.user().unwrap().email(), "ada@uni.edu");
        assert_eq!(state.role(), Some(Role::Student));
    })
    .await;
}

#[tokio::test]
async fn login_with_wrong_password_is_credential_error() {
    let service = FakeIdentityService::new();
    service.add_student("ada@uni.edu", "pw");

    with_store(&service, |store| async move {
        settled(&store).await;

        let err = store.login("ada@uni.edu", "nope").await.unwrap_err();
        assert_eq!(err, AuthError::Credential("Invalid login credentials".into()));

        drain().await;
        assert_eq!(store.state(), AuthState::signed_out());
    })
    .await;
}

#[tokio::test]
async fn login_does_not_publish_before_profile_arrives() {
    let service = FakeIdentityService::new();
    let id = service.add_student("ada@uni.edu", "pw");
    let gate = service.gate_profile(&id);

    with_store(&service, |store| async move {
        settled(&store).await;
        store.login("ada@uni.edu", "pw").await.unwrap();
        drain().await;
        assert!(!store.state().is_authenticated());

        gate.notify_one();
        store.wait_for(AuthState::is_authenticated).await.unwrap();
    })
    .await;
}

// =============================================================================
// signup
// =============================================================================

#[tokio::test]
async fn student_signup_writes_incomplete_profile_with_no_skills() {
    let service = FakeIdentityService::new();

    with_store(&service, |store| async move {
        settled(&store).await;
        store.signup(&student_signup("grace@yale.edu")).await.unwrap();

        let state = store.wait_for(AuthState::is_authenticated).await.unwrap();
        let crate::profile::User::Student(profile) = state.user().unwrap().clone() else {
            panic!("expected a student");
        };
        assert_eq!(profile.first_name, "Grace");
        assert!(profile.skills.is_empty());
        assert!(!profile.is_profile_complete);
    })
    .await;

    let id = service.user_id_for("grace@yale.edu").unwrap();
    let row = service.profile(&id).unwrap();
    assert_eq!(row.user_type, Role::Student);
    assert_eq!(row.skills, Some(vec![]));
    assert!(!row.is_profile_complete);
}

#[tokio::test]
async fn company_signup_writes_unverified_company_profile() {
    let service = FakeIdentityService::new();

    with_store(&service, |store| async move {
        settled(&store).await;
        store.signup(&company_signup("bill@initech.test")).await.unwrap();
        let state = store.wait_for(AuthState::is_authenticated).await.unwrap();
        assert_eq!(state.role(), Some(Role::Company));
    })
    .await;

    let id = service.user_id_for("bill@initech.test").unwrap();
    let row = service.profile(&id).unwrap();
    assert_eq!(row.user_type, Role::Company);
    assert_eq!(row.company_size.as_deref(), Some("51-200"));
    assert_eq!(row.is_verified, Some(false));
    assert!(!row.is_profile_complete);
}

#[tokio::test]
async fn signup_awaiting_confirmation_is_pending_not_failed() {
    let service = FakeIdentityService::new();
    service.require_confirmation();

    let svc = Rc::clone(&service);
    with_store(&service, |store| async move {
        settled(&store).await;
        let outcome = store.signup(&student_signup("grace@yale.edu")).await.unwrap();
        assert_eq!(outcome, SignupOutcome::ConfirmationPending);
        assert_eq!(svc.profile_writes(), 1);
        assert_eq!(svc.sign_out_calls(), 0);

        drain().await;
        assert_eq!(store.state(), AuthState::signed_out());
    })
    .await;
    assert!(service.user_id_for("grace@yale.edu").is_some());
    assert!(!service.has_session());
}

#[tokio::test]
async fn auto_confirmed_signup_reports_signed_in() {
    let service = FakeIdentityService::new();

    with_store(&service, |store| async move {
        settled(&store).await;
        let outcome = store.signup(&company_signup("bill@initech.test")).await.unwrap();
        assert_eq!(outcome, SignupOutcome::SignedIn);
    })
    .await;
}

#[tokio::test]
async fn signup_profile_write_failure_signs_out_and_keeps_message() {
    let service = FakeIdentityService::new();
    service.fail_profile_writes(ServiceError::Response {
        status: 403,
        message: Some("permission denied for table profiles".into()),
    });

    let svc = Rc::clone(&service);
    with_store(&service, |store| async move {
        settled(&store).await;

        let err = store.signup(&student_signup("grace@yale.edu")).await.unwrap_err();
        assert_eq!(err, AuthError::ProfileWrite("permission denied for table profiles".into()));
        assert_eq!(svc.sign_out_calls(), 1);

        drain().await;
        assert_eq!(store.state(), AuthState::signed_out());
    })
    .await;
    assert!(!service.has_session());
}

#[tokio::test]
async fn signup_write_failure_without_message_uses_fallback() {
    let service = FakeIdentityService::new();
    service.fail_profile_writes(ServiceError::Response { status: 500, message: None });

    with_store(&service, |store| async move {
        settled(&store).await;
        let err = store.signup(&student_signup("grace@yale.edu")).await.unwrap_err();
        assert_eq!(err, AuthError::ProfileWrite("Signup failed: Unknown error occurred".into()));
    })
    .await;
}

#[tokio::test]
async fn failed_compensating_sign_out_still_reports_write_error() {
    let service = FakeIdentityService::new();
    service.fail_profile_writes(ServiceError::Request("offline".into()));
    service.fail_sign_out(ServiceError::Request("offline".into()));

    with_store(&service, |store| async move {
        settled(&store).await;
        let err = store.signup(&student_signup("grace@yale.edu")).await.unwrap_err();
        assert_eq!(err, AuthError::ProfileWrite("offline".into()));
    })
    .await;

    // Orphaned: identity and session survive.
    assert!(service.user_id_for("grace@yale.edu").is_some());
    assert!(service.has_session());
}

#[tokio::test]
async fn signup_with_taken_email_surfaces_service_message() {
    let service = FakeIdentityService::new();
    service.add_student("grace@yale.edu", "pw");

    with_store(&service, |store| async move {
        settled(&store).await;
        let err = store.signup(&student_signup("grace@yale.edu")).await.unwrap_err();
        assert_eq!(err, AuthError::Service("User already registered".into()));
    })
    .await;
    assert_eq!(service.profile_writes(), 0);
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_user_after_signed_out_event() {
    let service = FakeIdentityService::new();
    service.add_company("hr@acme.test", "pw");

    with_store(&service, |store| async move {
        settled(&store).await;
        store.login("hr@acme.test", "pw").await.unwrap();
        store.wait_for(AuthState::is_authenticated).await.unwrap();

        store.logout().await;
        let state = store.wait_for(|s| !s.is_authenticated()).await.unwrap();
        assert_eq!(state, AuthState::signed_out());
    })
    .await;
}

#[tokio::test]
async fn repeated_logout_while_signed_out_changes_nothing() {
    let service = FakeIdentityService::new();

    with_store(&service, |store| async move {
        settled(&store).await;
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.logout().await;
        store.logout().await;
        drain().await;

        assert_eq!(store.state(), AuthState::signed_out());
        assert!(!rx.has_changed().unwrap());
    })
    .await;
}

#[tokio::test]
async fn logout_failure_keeps_user_signed_in() {
    let service = FakeIdentityService::new();
    service.add_student("ada@uni.edu", "pw");
    service.fail_sign_out(ServiceError::Request("offline".into()));

    with_store(&service, |store| async move {
        settled(&store).await;
        store.login("ada@uni.edu", "pw").await.unwrap();
        store.wait_for(AuthState::is_authenticated).await.unwrap();

        store.logout().await;
        drain().await;
        assert!(store.state().is_authenticated());
    })
    .await;
}

// =============================================================================
// update_profile
// =============================================================================

#[tokio::test]
async fn update_profile_without_user_writes_nothing() {
    let service = FakeIdentityService::new();

    with_store(&service, |store| async move {
        settled(&store).await;
        let patch = ProfilePatch { bio: Some("hi".into()), ..ProfilePatch::default() };
        let err = store.update_profile(&patch).await.unwrap_err();
        assert_eq!(err, AuthError::NotAuthenticated);
        assert_eq!(err.to_string(), "No authenticated user");
    })
    .await;
    assert_eq!(service.profile_writes(), 0);
}

#[tokio::test]
async fn update_profile_publishes_server_row_before_returning() {
    let service = FakeIdentityService::new();
    service.add_student("ada@uni.edu", "pw");

    with_store(&service, |store| async move {
        settled(&store).await;
        store.login("ada@uni.edu", "pw").await.unwrap();
        store.wait_for(AuthState::is_authenticated).await.unwrap();

        let patch = ProfilePatch {
            bio: Some("Analytical engines".into()),
            skills: Some(vec!["Rust".into(), "Math".into()]),
            ..ProfilePatch::default()
        };
        let user = store.update_profile(&patch).await.unwrap();

        assert_eq!(store.state().user(), Some(&user));
        let User::Student(profile) = user else { panic!("expected a student") };
        assert_eq!(profile.bio.as_deref(), Some("Analytical engines"));
        assert_eq!(profile.skills, vec!["Rust", "Math"]);
    })
    .await;
}

#[tokio::test]
async fn update_profile_failure_leaves_state_alone() {
    let service = FakeIdentityService::new();
    service.add_student("ada@uni.edu", "pw");

    let svc = Rc::clone(&service);
    with_store(&service, |store| async move {
        settled(&store).await;
        store.login("ada@uni.edu", "pw").await.unwrap();
        let before = store.wait_for(AuthState::is_authenticated).await.unwrap();

        svc.fail_profile_writes(ServiceError::Response { status: 400, message: Some("bad url".into()) });
        let patch = ProfilePatch { website: Some("nope".into()), ..ProfilePatch::default() };
        let err = store.update_profile(&patch).await.unwrap_err();

        assert_eq!(err, AuthError::Service("bad url".into()));
        assert_eq!(store.state(), before);
    })
    .await;
}
